pub mod api;
pub mod config;
pub mod errors;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use workout_core::LogStore;

#[derive(Clone)]
pub struct AppState {
    pub store: LogStore,
}

impl AppState {
    pub fn new(store: LogStore) -> Self {
        Self { store }
    }
}

/// All routes with CORS open to any origin (credentials allowed) and
/// per-request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::root))
        .route("/users", get(api::list_users))
        .route("/logs/:username", get(api::get_logs).post(api::add_log))
        .route("/health", get(|| async { "OK" }))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
