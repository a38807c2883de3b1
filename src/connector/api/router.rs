use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::container::Container;
use super::controller::{health, recognize, register};

/// HTTP routes of the service.
pub fn router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route("/register", post(register))
        .route("/recognize", post(recognize))
        .route("/health", get(health))
        .with_state(container)
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, container: Arc<Container>, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("listener has no local address")?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(container))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}

pub async fn serve(addr: SocketAddr, container: Arc<Container>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    serve_on(listener, container, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Cannot listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
