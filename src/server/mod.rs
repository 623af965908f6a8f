//! Server module for building the HTTP application
//!
//! This module provides a `ServerBuilder` that registers:
//! - the dish and order routes through their entity descriptors
//! - health check routes
//! - JSON fallbacks for unknown paths and unsupported methods

pub mod builder;
pub mod entity_registry;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
