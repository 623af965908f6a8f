//! In-memory implementation of `Store` for development and tests

use crate::core::{Record, Removal, Store};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory store keeping records in insertion order
///
/// Uses a RwLock for thread-safe access. Clones share the same collection,
/// so a test can keep a handle on a store it gave to the server.
#[derive(Clone)]
pub struct InMemoryStore<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> InMemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a store preloaded with `records`
    ///
    /// Fails if two records share an id.
    pub fn with_records(records: Vec<T>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for record in &records {
            if !seen.insert(record.id().to_string()) {
                return Err(anyhow!(
                    "{} with id '{}' appears more than once",
                    T::RESOURCE,
                    record.id()
                ));
            }
        }
        Ok(Self {
            records: Arc::new(RwLock::new(records)),
        })
    }
}

impl<T: Record> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Store<T> for InMemoryStore<T> {
    async fn list(&self) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.clone())
    }

    async fn find(&self, id: &str) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn append(&self, record: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if records.iter().any(|r| r.id() == record.id()) {
            return Err(anyhow!(
                "{} with id '{}' already exists",
                T::RESOURCE,
                record.id()
            ));
        }

        records.push(record.clone());

        Ok(record)
    }

    async fn update_in_place(
        &self,
        id: &str,
        apply: Box<dyn for<'a> FnOnce(&'a mut T) + Send>,
    ) -> Result<Option<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };

        apply(record);

        Ok(Some(record.clone()))
    }

    async fn remove_by_id(&self, id: &str) -> Result<Option<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(records
            .iter()
            .position(|r| r.id() == id)
            .map(|index| records.remove(index)))
    }

    async fn remove_if(
        &self,
        id: &str,
        predicate: for<'a> fn(&'a T) -> bool,
    ) -> Result<Removal<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(index) = records.iter().position(|r| r.id() == id) else {
            return Ok(Removal::Missing);
        };

        if predicate(&records[index]) {
            Ok(Removal::Removed(records.remove(index)))
        } else {
            Ok(Removal::Kept(records[index].clone()))
        }
    }

    async fn count(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.len())
    }
}
