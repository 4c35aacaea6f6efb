//! API route definitions

mod cache;
mod health;
mod recommend;

use axum::Router;
use serde::Serialize;

use crate::AppState;

/// Structured error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(recommend::routes())
        .merge(cache::routes())
        .merge(health::routes())
}
