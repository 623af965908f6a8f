//! Base trait for records held in a store

use serde::Serialize;
use uuid::Uuid;

/// A record owned by a [`Store`](crate::core::Store)
///
/// Every record carries a string id that is assigned once at creation and
/// never changes afterwards.
pub trait Record: Clone + Serialize + Send + Sync + 'static {
    /// Resource name used in client-facing messages ("Dish", "Order")
    const RESOURCE: &'static str;

    /// The record's unique id
    fn id(&self) -> &str;
}

/// Generate a fresh record id (128 random bits as 32 lowercase hex chars)
pub fn next_id() -> String {
    Uuid::new_v4().simple().to_string()
}
