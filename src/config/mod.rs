//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file (path in `GRUBDASH_CONFIG`)
//! and is then overridden by the `HOST` and `PORT` environment variables.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 5000
//! seed:
//!   dishes:
//!     - id: 3c637d011d844ebab1205fef8a7e36ea
//!       name: Broccoli and beetroot stir fry
//!       description: Crunchy vegetables cooked quickly in a hot wok.
//!       price: 15
//!       image_url: https://images.example.com/stir-fry.jpg
//! ```

use crate::entities::{Dish, Order};
use crate::storage::InMemoryStore;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH_VAR: &str = "GRUBDASH_CONFIG";
pub const HOST_VAR: &str = "HOST";
pub const PORT_VAR: &str = "PORT";

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Address the HTTP server binds to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for `TcpListener::bind`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Records preloaded into the stores at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub dishes: Vec<Dish>,

    #[serde(default)]
    pub orders: Vec<Order>,
}

impl SeedData {
    /// Build a dish store holding the seeded dishes
    pub fn dish_store(&self) -> Result<InMemoryStore<Dish>> {
        InMemoryStore::with_records(self.dishes.clone()).context("invalid seed dishes")
    }

    /// Build an order store holding the seeded orders
    pub fn order_store(&self) -> Result<InMemoryStore<Order>> {
        InMemoryStore::with_records(self.orders.clone()).context("invalid seed orders")
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrubDashConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub seed: SeedData,
}

impl GrubDashConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("failed to parse config file '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(
            std::env::var(HOST_VAR).ok(),
            std::env::var(PORT_VAR).ok(),
        )?;
        Ok(config)
    }

    /// Apply host and port overrides
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<String>) -> Result<()> {
        if let Some(host) = host.filter(|h| !h.is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = port.filter(|p| !p.is_empty()) {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow!("invalid {} '{}': {}", PORT_VAR, port, e))?;
        }
        Ok(())
    }

    /// Check the seed data: ids must be unique per resource
    pub fn validate(&self) -> Result<()> {
        self.seed.dish_store()?;
        self.seed.order_store()?;
        Ok(())
    }
}
