//! Ordered guard chains
//!
//! A [`Chain`] is the list of guards that precede one handler. Guards run
//! strictly in order against a shared [`GuardContext`]; the first failure
//! halts the chain and is returned as-is. Errors are never aggregated.

use crate::core::{ApiError, ApiResult, Record};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

static NULL: Value = Value::Null;

/// Per-request state shared by every guard in a chain
pub struct GuardContext<T> {
    route_id: Option<String>,
    payload: Value,
    found: Option<T>,
}

impl<T: Record> GuardContext<T> {
    /// Create a context for a request
    ///
    /// `payload` is the content of the request's `data` member.
    pub fn new(route_id: Option<String>, payload: Value) -> Self {
        Self {
            route_id,
            payload,
            found: None,
        }
    }

    /// The id taken from the route path, if the route has one
    pub fn route_id(&self) -> Option<&str> {
        self.route_id.as_deref()
    }

    /// A payload field, `null` when absent
    pub fn field(&self, name: &str) -> &Value {
        self.payload.get(name).unwrap_or(&NULL)
    }

    /// The record stored by an earlier existence guard
    pub fn found(&self) -> Option<&T> {
        self.found.as_ref()
    }

    pub fn set_found(&mut self, record: T) {
        self.found = Some(record);
    }

    /// Take the record stored by the existence guard
    pub fn take_found(&mut self) -> ApiResult<T> {
        self.found.take().ok_or_else(|| {
            ApiError::unhandled(format!("{} lookup did not run before handler", T::RESOURCE))
        })
    }

    /// Deserialize the validated payload into a typed draft
    pub fn parse<D: DeserializeOwned>(&self) -> ApiResult<D> {
        serde_json::from_value(self.payload.clone()).map_err(|e| {
            ApiError::invalid_input(format!("Invalid {} data: {}.", T::RESOURCE.to_lowercase(), e))
        })
    }
}

/// A single validation step
#[async_trait]
pub trait Guard<T: Record>: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Pass with `Ok(())` or halt the chain with an error
    async fn check(&self, ctx: &mut GuardContext<T>) -> ApiResult<()>;
}

/// Guard built from a synchronous check over the context
pub struct FnGuard<F> {
    name: String,
    check: F,
}

impl<F> FnGuard<F> {
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

#[async_trait]
impl<T, F> Guard<T> for FnGuard<F>
where
    T: Record,
    F: Fn(&GuardContext<T>) -> ApiResult<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, ctx: &mut GuardContext<T>) -> ApiResult<()> {
        (self.check)(ctx)
    }
}

/// Ordered list of guards run in front of a handler
pub struct Chain<T> {
    operation: &'static str,
    guards: Vec<Box<dyn Guard<T>>>,
}

impl<T: Record> Chain<T> {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            guards: Vec::new(),
        }
    }

    /// Append a guard to the end of the chain
    pub fn guard(mut self, guard: impl Guard<T> + 'static) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    /// Append a synchronous check
    pub fn check<F>(self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&GuardContext<T>) -> ApiResult<()> + Send + Sync + 'static,
    {
        self.guard(FnGuard::new(name, check))
    }

    /// Run every guard in order, stopping at the first failure
    ///
    /// On success the context is handed back for the handler.
    pub async fn run(&self, mut ctx: GuardContext<T>) -> ApiResult<GuardContext<T>> {
        for guard in &self.guards {
            if let Err(err) = guard.check(&mut ctx).await {
                tracing::debug!(
                    resource = T::RESOURCE,
                    operation = self.operation,
                    guard = guard.name(),
                    error = %err,
                    "guard halted chain"
                );
                return Err(err);
            }
        }
        Ok(ctx)
    }

    /// Guard names, in execution order
    pub fn guard_names(&self) -> Vec<&str> {
        self.guards.iter().map(|g| g.name()).collect()
    }
}
