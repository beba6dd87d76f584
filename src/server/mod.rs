// ABOUTME: HTTP server for the provisioning API
// ABOUTME: Builds the axum router with permissive CORS and request tracing, and serves it

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::provision::Provisioner;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub provisioner: Arc<Provisioner>,
}

impl AppState {
    pub fn new(provisioner: Provisioner) -> Self {
        Self {
            provisioner: Arc::new(provisioner),
        }
    }
}

/// The API router. Any origin may call it.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(routes::generate))
        .route("/plan", post(routes::plan))
        .route("/apply", post(routes::apply))
        .route("/configure", post(routes::configure))
        .route("/status", get(routes::status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Provisioning API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
