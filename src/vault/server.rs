use super::handlers::{
    handle_element_delete, handle_element_get, handle_group_delete, handle_group_list,
    handle_group_upload, handle_groups, handle_ping,
};
use super::operators::VaultState;
use super::recovery::rebuild_index;
use crate::config::VaultConfig;
use anyhow::Result;
use axum::Router;
use axum::extract::{DefaultBodyLimit, Extension};
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;

/// Recovers the index from disk and runs the vault HTTP server.
///
/// Recovery must fully succeed before the listener is bound; a vault never
/// serves traffic over a partial index.
pub async fn serve(config: VaultConfig) -> Result<()> {
    if !config.root.exists() {
        tracing::info!("Vault root {} does not exist, creating it", config.root.display());
        std::fs::create_dir_all(&config.root)?;
    }

    let index = rebuild_index(&config.root)?;
    tracing::info!(
        "Recovered {} records from {}",
        index.len(),
        config.root.display()
    );

    let port = config.port;
    let max_upload_size = config.max_upload_size;
    let state = Arc::new(VaultState::new(config, index));

    let app = Router::new()
        .route("/ping", get(handle_ping))
        .route("/groups", get(handle_groups))
        .route(
            "/group",
            get(handle_group_list)
                .put(handle_group_upload)
                .delete(handle_group_delete),
        )
        .route(
            "/group/element",
            get(handle_element_get).delete(handle_element_delete),
        )
        .layer(DefaultBodyLimit::max(max_upload_size))
        .layer(Extension(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Vault listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
