//! JSON envelopes
//!
//! Requests and responses wrap their payload in a `data` member:
//! `{ "data": <record-or-array> }`.

use crate::core::ApiError;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::Serialize;
use serde_json::{Map, Value};

/// Axum extractor yielding the `data` member of a JSON request body
///
/// A missing body, a body without `data`, or a `data` member that is not an
/// object all yield an empty object, so required-field guards report the
/// missing field. A body that is not JSON at all is rejected with 400.
///
/// # Usage
///
/// ```rust,ignore
/// async fn create_dish(Envelope(payload): Envelope) -> ApiResult<...> {
///     // payload is the object under "data"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Envelope(pub Value);

impl Envelope {
    /// Extract the `data` member from a parsed body
    pub fn from_body(body: Value) -> Self {
        let data = match body {
            Value::Object(mut map) => map.remove("data"),
            _ => None,
        };
        match data {
            Some(data @ Value::Object(_)) => Envelope(data),
            _ => Envelope(Value::Object(Map::new())),
        }
    }
}

impl<S> FromRequest<S> for Envelope
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_input(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Envelope::from_body(Value::Null));
        }

        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::invalid_input(format!("Invalid JSON: {}.", e)))?;

        Ok(Envelope::from_body(body))
    }
}

/// Response wrapper serializing as `{ "data": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
