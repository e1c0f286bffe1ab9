//! Axum router configuration

use crate::server::ServerState;
use crate::server::handlers;
use axum::{
    Router,
    routing::{get, post},
};

/// Create the application router
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/parse", post(handlers::parse))
        .route("/entry", post(handlers::create_entry))
        .route("/summary", get(handlers::summary))
        .route("/entries", get(handlers::list_entries))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
