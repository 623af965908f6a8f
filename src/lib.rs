//! # GrubDash
//!
//! A REST backend for a food delivery service, exposing **dishes** and
//! **orders** over HTTP.
//!
//! ## Design
//!
//! - **Stores**: each resource owns a [`Store`](core::Store), an ordered
//!   collection of records. [`InMemoryStore`](storage::InMemoryStore) is the
//!   shipped implementation.
//! - **Guard chains**: every operation runs an ordered
//!   [`Chain`](core::validation::Chain) of guards before its handler. The
//!   first failing guard decides the response.
//! - **Envelopes**: request and response bodies wrap their payload in
//!   `{ "data": ... }`; errors are `{ "error": "<message>" }`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use grubdash::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = GrubDashConfig::from_env()?;
//!     let addr = config.server.address();
//!     ServerBuilder::new().with_config(&config)?.serve(&addr).await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod resources;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::{GrubDashConfig, SeedData, ServerConfig};
    pub use crate::core::validation::{
        Chain, Exists, Guard, GuardContext, id_matches_route, require,
    };
    pub use crate::core::{
        ApiError, ApiResult, Data, Envelope, ErrorResponse, Record, Removal, Store, next_id,
    };
    pub use crate::entities::{Dish, DishDraft, LineItem, Order, OrderDraft, OrderStatus};
    pub use crate::resources::{DishResource, OrderResource};
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder};
    pub use crate::storage::InMemoryStore;
}
