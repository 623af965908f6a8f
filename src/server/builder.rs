//! Assembles the router and runs the HTTP server

use super::entity_registry::EntityRegistry;
use super::router::{health_routes, path_not_found};
use crate::config::GrubDashConfig;
use crate::core::Store;
use crate::entities::{Dish, Order};
use crate::resources::{DishDescriptor, DishResource, OrderDescriptor, OrderResource};
use crate::storage::InMemoryStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for creating the HTTP application
///
/// Stores default to empty in-memory stores.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_dish_store(InMemoryStore::new())
///     .with_order_store(InMemoryStore::new())
///     .build();
/// ```
pub struct ServerBuilder {
    dish_store: Option<Arc<dyn Store<Dish>>>,
    order_store: Option<Arc<dyn Store<Order>>>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            dish_store: None,
            order_store: None,
        }
    }

    /// Set the dish store
    pub fn with_dish_store(mut self, store: impl Store<Dish> + 'static) -> Self {
        self.dish_store = Some(Arc::new(store));
        self
    }

    /// Set the order store
    pub fn with_order_store(mut self, store: impl Store<Order> + 'static) -> Self {
        self.order_store = Some(Arc::new(store));
        self
    }

    /// Use in-memory stores preloaded with the configuration's seed data
    pub fn with_config(self, config: &GrubDashConfig) -> Result<Self> {
        let dishes = config.seed.dish_store()?;
        let orders = config.seed.order_store()?;
        Ok(self.with_dish_store(dishes).with_order_store(orders))
    }

    /// Assemble health and resource routes behind a JSON 404 fallback and
    /// the HTTP trace layer
    pub fn build(self) -> Router {
        let dish_store = self
            .dish_store
            .unwrap_or_else(|| Arc::new(InMemoryStore::<Dish>::new()) as Arc<dyn Store<Dish>>);
        let order_store = self
            .order_store
            .unwrap_or_else(|| Arc::new(InMemoryStore::<Order>::new()) as Arc<dyn Store<Order>>);

        let mut registry = EntityRegistry::new();
        registry.register(Box::new(DishDescriptor::new(Arc::new(DishResource::new(
            dish_store,
        )))));
        registry.register(Box::new(OrderDescriptor::new(Arc::new(
            OrderResource::new(order_store),
        ))));

        tracing::debug!(resources = ?registry.entity_types(), "resource routes registered");

        health_routes()
            .merge(registry.build_routes())
            .fallback(path_not_found)
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// Bind `addr` and serve until SIGINT or SIGTERM
    ///
    /// In-flight requests finish before this returns.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%addr, "grubdash listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("grubdash stopped");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("SIGINT received, draining connections");
        },
        _ = terminate => {
            tracing::info!("SIGTERM received, draining connections");
        },
    }
}
