//! Sharded Object Store Library
//!
//! This library crate defines the core modules that make up the two-tier
//! store. It serves as the foundation for the binary executable (`main.rs`),
//! which runs either role.
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems:
//!
//! - **`gatekeeper`**: The stateless router tier. Owns the consistent hash
//!   ring that pins each group to one vault, relays group-scoped requests
//!   verbatim, and fans fleet-wide reads out to every vault in parallel.
//! - **`vault`**: The storage node tier. Persists opaque blobs with sidecar
//!   metadata under a group-per-directory layout, ingests multipart uploads
//!   concurrently, and rebuilds its index from disk at startup.
//! - **`index`**: The in-memory search structure inside every vault. Maps
//!   attribute equality predicates to record ids, kept transactionally in
//!   step with the attribute store.
//! - **`config`**: Per-role configuration documents, loaded once at startup
//!   and passed by ownership into the servers.

pub mod config;
pub mod gatekeeper;
pub mod index;
pub mod vault;
