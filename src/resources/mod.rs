//! Dish and order resources
//!
//! Each resource owns its store and one guard chain per operation. The
//! operations are plain async methods; the axum handlers in each module are
//! thin adapters that extract the route id and payload and wrap the result in
//! a `{ "data": ... }` envelope.

pub mod dishes;
pub mod orders;

pub use dishes::{DishDescriptor, DishResource};
pub use orders::{OrderDescriptor, OrderResource};

use crate::core::Record;
use serde::Deserialize;

/// Query string accepted by the list routes
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Keep only the record with this id
    pub id: Option<String>,
}

/// Keep the records matching `id`, or all of them when no id is given
fn filter_by_id<T: Record>(records: Vec<T>, id: Option<&str>) -> Vec<T> {
    match id {
        Some(id) => records.into_iter().filter(|r| r.id() == id).collect(),
        None => records,
    }
}
