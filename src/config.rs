//! Process Configuration
//!
//! Each role reads one JSON document at startup. The parsed value is passed
//! by ownership into the server; nothing here is global or mutable after
//! load.

use crate::gatekeeper::ring::RingNode;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration for the gatekeeper (router) process.
#[derive(Debug, Clone, Deserialize)]
pub struct GatekeeperConfig {
    /// Listening port.
    pub port: u16,
    /// Vault addresses (host:port) with optional ring weights.
    pub vaults: Vec<RingNode>,
    /// Timeout for fan-out requests, in seconds.
    pub broadcast_timeout: u64,
}

/// Configuration for a vault (storage node) process.
#[derive(Debug, Clone, Deserialize)]
pub struct VaultConfig {
    /// Unique identifier reported by `/ping`.
    pub id: String,
    /// Root directory holding one subdirectory per group.
    pub root: PathBuf,
    /// Listening port.
    pub port: u16,
    /// Maximum total size of an upload request body, in bytes.
    pub max_upload_size: usize,
    /// Maximum size of a single buffered multipart file, in bytes.
    pub in_memory_upload_size: usize,
}

pub fn load_gatekeeper(path: &Path) -> Result<GatekeeperConfig> {
    let data = std::fs::read(path)
        .with_context(|| format!("reading gatekeeper configuration {}", path.display()))?;
    let config: GatekeeperConfig =
        serde_json::from_slice(&data).context("parsing gatekeeper configuration")?;
    Ok(config)
}

pub fn load_vault(path: &Path) -> Result<VaultConfig> {
    let data = std::fs::read(path)
        .with_context(|| format!("reading vault configuration {}", path.display()))?;
    let config: VaultConfig =
        serde_json::from_slice(&data).context("parsing vault configuration")?;
    Ok(config)
}
