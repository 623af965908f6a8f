//! Routes and fallbacks shared by every resource

use crate::core::ApiError;
use axum::extract::OriginalUri;
use axum::http::Method;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Build health check routes
///
/// - GET /health
/// - GET /healthz
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "grubdash"
    }))
}

/// Fallback for a known path called with an unsupported method
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::method_not_allowed(format!("{} not allowed for {}", method, uri.path()))
}

/// Fallback for paths no route matches
pub async fn path_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::not_found(format!("Path not found: {}", uri.path()))
}
