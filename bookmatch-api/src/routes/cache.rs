//! Serving-cache management endpoints

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tracing::info;

use bookmatch_services::CacheStats;

use crate::AppState;

#[derive(Debug, Serialize)]
struct ClearResponse {
    cleared: usize,
}

async fn cache_status(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

async fn cache_clear(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.clear();
    info!("Cleared {} cache entries", cleared);
    Json(ClearResponse { cleared })
}

/// Create cache routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cache/status", get(cache_status))
        .route("/cache/clear", post(cache_clear))
}
