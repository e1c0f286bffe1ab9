//! HTTP surface for the cookbook
//!
//! Routes:
//! - `POST /parse` - canonicalize a name
//! - `POST /entry` - add an ingredient or recipe
//! - `GET /summary?name=` - resolve a recipe
//! - `GET /entries` - dump every stored entry
//! - `GET /health` - liveness check

mod handlers;
mod routes;

pub use routes::create_router;

use crate::resolve::Resolver;
use crate::store::{EntryStore, SharedStore};
use anyhow::{Context, Result};
use std::net::SocketAddr;

/// State shared by every handler
#[derive(Clone)]
pub struct ServerState {
    pub store: SharedStore,
    pub resolver: Resolver,
}

impl ServerState {
    pub fn new(store: EntryStore, resolver: Resolver) -> Self {
        Self {
            store: store.into_shared(),
            resolver,
        }
    }
}

/// Serve the cookbook until Ctrl-C
pub async fn run_server(bind: SocketAddr, state: ServerState) -> Result<()> {
    tracing::info!("Starting cookbook server on {}", bind);
    tracing::info!("Expansion limit: {}", state.resolver.max_expansions());
    {
        let store = state.store.read().await;
        if !store.is_empty() {
            tracing::info!("Seeded with {} entries", store.len());
        }
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    tracing::info!("Running on: http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
