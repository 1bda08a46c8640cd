use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod handlers;
pub mod models;
pub mod storage;

use storage::UrlStorage;

// ── Shared application state ───────────────────────────────────────────────

pub struct AppState {
    pub storage: Arc<dyn UrlStorage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn UrlStorage>) -> Self {
        Self { storage }
    }
}

// ── Router ─────────────────────────────────────────────────────────────────

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { axum::http::StatusCode::OK }))
        .route("/url", post(handlers::url::save))
        .route("/url/:alias", delete(handlers::url::delete))
        // Alias redirect must come LAST so fixed paths take priority
        .route("/:alias", get(handlers::redirect::redirect))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
