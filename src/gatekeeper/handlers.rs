use super::broadcast::broadcast_get;
use super::forward::relay;
use super::ring::HashRing;
use super::types::PingResults;
use crate::config::GatekeeperConfig;
use crate::vault::types::PingResponse;
use axum::extract::{Extension, Query, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Shared router state: the immutable ring, the outbound client and the
/// configuration it was all built from.
pub struct GatekeeperState {
    pub config: GatekeeperConfig,
    pub ring: HashRing,
    pub client: reqwest::Client,
    pub broadcast_timeout: Duration,
}

impl GatekeeperState {
    fn vault_addresses(&self) -> Vec<String> {
        self.config.vaults.iter().map(|v| v.address.clone()).collect()
    }
}

/// Liveness plus fleet health: pings every vault and reports how many
/// answered, embedding the summary as a JSON string in `extended`.
pub async fn handle_ping(Extension(state): Extension<Arc<GatekeeperState>>) -> Response {
    let addresses = state.vault_addresses();
    let responses = broadcast_get(
        &state.client,
        "/ping",
        &addresses,
        state.broadcast_timeout,
    )
    .await;

    let mut vaults_online = 0;
    let mut vaults_failed = Vec::new();
    for (address, response) in addresses.iter().zip(&responses) {
        match response {
            Some(r) if r.status().is_success() => vaults_online += 1,
            _ => vaults_failed.push(address.clone()),
        }
    }

    let results = PingResults {
        vaults_number: addresses.len(),
        vaults_online,
        vaults_failed,
    };
    let extended = match serde_json::to_string(&results) {
        Ok(extended) => extended,
        Err(e) => {
            tracing::error!("Failed to encode ping summary: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to encode ping summary")
                .into_response();
        }
    };

    Json(PingResponse {
        id: "gatekeeper".to_string(),
        instance: "gatekeeper".to_string(),
        extended,
    })
    .into_response()
}

/// Concatenates the group lists of every reachable vault. Unreachable
/// vaults are skipped; a vault answering garbage is a 500.
pub async fn handle_groups(Extension(state): Extension<Arc<GatekeeperState>>) -> Response {
    let addresses = state.vault_addresses();
    let responses = broadcast_get(
        &state.client,
        "/groups",
        &addresses,
        state.broadcast_timeout,
    )
    .await;

    let mut groups: Vec<String> = Vec::new();
    for response in responses {
        let Some(response) = response else {
            continue;
        };
        if !response.status().is_success() {
            continue;
        }
        match response.json::<Vec<String>>().await {
            Ok(list) => groups.extend(list),
            Err(e) => {
                tracing::error!("Failed to decode groups response: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "failed to aggregate groups")
                    .into_response();
            }
        }
    }

    Json(groups).into_response()
}

/// Forwards any group-scoped request to the vault owning its `groupId`.
/// The vault validates the ids; the gatekeeper only routes.
pub async fn handle_group_scoped(
    Extension(state): Extension<Arc<GatekeeperState>>,
    Query(params): Query<HashMap<String, String>>,
    request: Request,
) -> Response {
    let group_id = params.get("groupId").cloned().unwrap_or_default();

    let Some(address) = state.ring.resolve(&group_id) else {
        return (
            StatusCode::BAD_REQUEST,
            "group cannot be assigned to a vault",
        )
            .into_response();
    };

    relay(&state.client, address, request).await
}
