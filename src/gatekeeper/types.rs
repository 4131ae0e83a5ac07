//! Gatekeeper Data Types
//!
//! DTOs for the router's aggregated responses. Group-scoped traffic is
//! relayed verbatim and needs no types of its own.

use serde::{Deserialize, Serialize};

/// Fleet health summary embedded (JSON-encoded) in the `extended` field of
/// the gatekeeper's `/ping` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct PingResults {
    pub vaults_number: usize,
    pub vaults_online: usize,
    pub vaults_failed: Vec<String>,
}
