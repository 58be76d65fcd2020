//! Bare health-check endpoint for hosts that probe an HTTP port.

use std::net::SocketAddr;

use axum::{routing::get, Router};

pub fn health_router() -> Router {
    Router::new().route("/", get(health))
}

pub async fn health() -> &'static str {
    "ok"
}

pub fn listen_addr(port: u16) -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], port))
}

/// Serve `GET /` until the process exits.
pub async fn serve_health(port: u16) -> anyhow::Result<()> {
    let addr = listen_addr(port);
    let server = axum::Server::try_bind(&addr)?;
    tracing::info!(%addr, "health endpoint listening");
    server.serve(health_router().into_make_service()).await?;
    Ok(())
}
