//! Store trait for resource records

use crate::core::Record;
use anyhow::Result;
use async_trait::async_trait;

/// Outcome of a conditional removal
#[derive(Debug, Clone, PartialEq)]
pub enum Removal<T> {
    /// The record matched the predicate and was removed
    Removed(T),
    /// The record exists but did not match, so it was kept
    Kept(T),
    /// No record has that id
    Missing,
}

/// Ordered collection owning every record of one resource type
///
/// Implementations must keep ids unique and make each operation atomic with
/// respect to the others: a handler never observes a half-applied update.
#[async_trait]
pub trait Store<T: Record>: Send + Sync {
    /// All records, in insertion order
    async fn list(&self) -> Result<Vec<T>>;

    /// Find a record by id
    async fn find(&self, id: &str) -> Result<Option<T>>;

    /// Append a new record
    ///
    /// Fails if a record with the same id is already stored.
    async fn append(&self, record: T) -> Result<T>;

    /// Mutate a stored record in place and return the result
    ///
    /// Returns `None` when no record has that id.
    async fn update_in_place(
        &self,
        id: &str,
        apply: Box<dyn for<'a> FnOnce(&'a mut T) + Send>,
    ) -> Result<Option<T>>;

    /// Remove a record unconditionally
    async fn remove_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Remove a record only if `predicate` holds for it
    ///
    /// The check and the removal happen under a single lock.
    async fn remove_if(
        &self,
        id: &str,
        predicate: for<'a> fn(&'a T) -> bool,
    ) -> Result<Removal<T>>;

    /// Number of stored records
    async fn count(&self) -> Result<usize>;
}
