//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    service: &'static str,
    timestamp: DateTime<Utc>,
    books: i64,
    model_loaded: bool,
}

/// Health check handler
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let books = state.store.book_count().unwrap_or(-1);

    let status = if books < 0 {
        "unhealthy"
    } else if state.model_available {
        "healthy"
    } else {
        // Serving still works from persisted rows without the model
        "degraded"
    };

    let code = if books < 0 {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            service: "bookmatch-api",
            timestamp: Utc::now(),
            books,
            model_loaded: state.model_available,
        }),
    )
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
