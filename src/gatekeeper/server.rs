use super::handlers::{GatekeeperState, handle_group_scoped, handle_groups, handle_ping};
use super::ring::HashRing;
use crate::config::GatekeeperConfig;
use anyhow::Result;
use axum::Router;
use axum::extract::{DefaultBodyLimit, Extension};
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Builds the ring from configuration and runs the gatekeeper HTTP server.
pub async fn serve(config: GatekeeperConfig) -> Result<()> {
    let ring = HashRing::new(&config.vaults);
    if ring.is_empty() {
        tracing::warn!("No vaults configured, every group-scoped request will fail");
    } else {
        tracing::info!("Hash ring built over {} vaults", ring.len());
    }

    let port = config.port;
    let state = Arc::new(GatekeeperState {
        ring,
        client: reqwest::Client::new(),
        broadcast_timeout: Duration::from_secs(config.broadcast_timeout),
        config,
    });

    // Upload bodies pass through untouched; the owning vault enforces its
    // own size limit.
    let app = Router::new()
        .route("/ping", get(handle_ping))
        .route("/groups", get(handle_groups))
        .route(
            "/group",
            get(handle_group_scoped)
                .put(handle_group_scoped)
                .delete(handle_group_scoped),
        )
        .route(
            "/group/element",
            get(handle_group_scoped).delete(handle_group_scoped),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(Extension(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Gatekeeper listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
