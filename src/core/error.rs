//! Typed error handling for the GrubDash API
//!
//! Every failure that reaches a client is an [`ApiError`]. Guards raise them
//! to halt a chain, handlers raise them on the delete path, and anything
//! unexpected (a poisoned store lock, a failed serialization) is folded into
//! [`ApiError::Unhandled`] at the HTTP boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use grubdash::prelude::*;
//!
//! fn check_price(price: f64) -> ApiResult<()> {
//!     if price <= 0.0 {
//!         return Err(ApiError::invalid_input(
//!             "Dish price must be an integer greater than zero.",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The error type returned by every guard and handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Missing or malformed input (400)
    InvalidInput(String),

    /// Referenced record or path does not exist (404)
    NotFound(String),

    /// The path exists but does not support the method (405)
    MethodNotAllowed(String),

    /// Any fault not raised by a guard (500)
    Unhandled(String),
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        ApiError::MethodNotAllowed(message.into())
    }

    pub fn unhandled(message: impl Into<String>) -> Self {
        ApiError::Unhandled(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The client-facing message, returned verbatim
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidInput(msg)
            | ApiError::NotFound(msg)
            | ApiError::MethodNotAllowed(msg)
            | ApiError::Unhandled(msg) => msg,
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.message().to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiError {}

/// Error body sent to clients: `{ "error": <message> }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "unhandled failure while serving request");
        }
        (status, Json(self.to_response())).into_response()
    }
}

/// Store and bootstrap code report faults through `anyhow`
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Unhandled(err.to_string())
    }
}

/// A specialized Result type for guards and handlers
pub type ApiResult<T> = Result<T, ApiError>;
