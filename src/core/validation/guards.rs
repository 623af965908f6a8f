//! Guards shared by every resource
//!
//! Resource-specific guards (price, status, line items) live with their
//! resource as plain checks; these three only depend on the record type.

use super::chain::{Guard, GuardContext};
use super::validators::{display_value, truthy};
use crate::core::{ApiError, ApiResult, Record, Store};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;

/// Fails with "Must include a `<field>`." when the field is absent or falsy
pub struct Require<T> {
    field: &'static str,
    name: String,
    _record: PhantomData<fn() -> T>,
}

pub fn require<T: Record>(field: &'static str) -> Require<T> {
    Require {
        field,
        name: format!("require:{}", field),
        _record: PhantomData,
    }
}

#[async_trait]
impl<T: Record> Guard<T> for Require<T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, ctx: &mut GuardContext<T>) -> ApiResult<()> {
        if truthy(ctx.field(self.field)) {
            Ok(())
        } else {
            Err(ApiError::invalid_input(format!(
                "Must include a {}.",
                self.field
            )))
        }
    }
}

/// A payload `id`, when present and non-empty, must equal the route id
pub struct IdMatchesRoute<T> {
    _record: PhantomData<fn() -> T>,
}

pub fn id_matches_route<T: Record>() -> IdMatchesRoute<T> {
    IdMatchesRoute {
        _record: PhantomData,
    }
}

#[async_trait]
impl<T: Record> Guard<T> for IdMatchesRoute<T> {
    fn name(&self) -> &str {
        "id-matches-route"
    }

    async fn check(&self, ctx: &mut GuardContext<T>) -> ApiResult<()> {
        let id = ctx.field("id");
        if !truthy(id) {
            return Ok(());
        }
        let route_id = ctx.route_id().unwrap_or_default();
        if id.as_str() == Some(route_id) {
            Ok(())
        } else {
            Err(ApiError::invalid_input(format!(
                "{resource} id does not match route id. {resource}: {}, Route: {}.",
                display_value(id),
                route_id,
                resource = T::RESOURCE,
            )))
        }
    }
}

/// Looks the route id up in the store and keeps the record in the context
pub struct Exists<T: Record> {
    store: Arc<dyn Store<T>>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Exists<T> {
    pub fn new(store: Arc<dyn Store<T>>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Record> Guard<T> for Exists<T> {
    fn name(&self) -> &str {
        "exists"
    }

    async fn check(&self, ctx: &mut GuardContext<T>) -> ApiResult<()> {
        let id = ctx.route_id().unwrap_or_default().to_string();
        match self.store.find(&id).await? {
            Some(record) => {
                ctx.set_found(record);
                Ok(())
            }
            None => Err(ApiError::not_found(format!(
                "{} does not exist: {}.",
                T::RESOURCE,
                id
            ))),
        }
    }
}
