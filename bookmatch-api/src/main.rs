//! Bookmatch API Server
//!
//! HTTP server for the news-driven book recommendation service. It only
//! reads: the offline pipeline (bookmatch-pipeline) produces the rows
//! this serves, with a TTL cache in front of the store.

mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;

use bookmatch_services::{CacheConfig, RecommendCache, RecommendStore, ServiceConfig};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecommendStore>,
    pub cache: Arc<RecommendCache>,
    /// Whether the embedding model artifact exists on disk. Serving works
    /// without it; health reports degraded.
    pub model_available: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local, then .env
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,bookmatch_api=debug")),
        )
        .init();

    info!("Starting Bookmatch API");

    let config = ServiceConfig::from_env();

    info!("Opening recommendation store at: {}", config.db_path);
    let store = Arc::new(RecommendStore::new(&config.db_path)?);
    info!("Catalog holds {} books", store.book_count()?);

    let model_available = std::path::Path::new(&config.model_path).exists();
    if model_available {
        info!("Embedding model artifact present at: {}", config.model_path);
    } else {
        info!(
            "No embedding model at {} - serving persisted recommendations only",
            config.model_path
        );
    }

    let cache = Arc::new(RecommendCache::new(&CacheConfig::default()));

    let state = AppState {
        store,
        cache,
        model_available,
    };

    // Configure CORS for frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Build router
    let app = Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
