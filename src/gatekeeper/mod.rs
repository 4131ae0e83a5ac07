//! Gatekeeper Module
//!
//! The stateless router in front of the vault fleet. It never stores data;
//! it decides which vault owns a request and moves bytes.
//!
//! ## Core Concepts
//! - **Sharding**: a consistent hash ring maps a group id to exactly one
//!   vault, deterministically across restarts (`ring`).
//! - **Forwarding**: group-scoped requests are relayed verbatim to the
//!   owning vault, responses come back verbatim (`forward`).
//! - **Fan-out**: fleet-wide reads (`/ping`, `/groups`) broadcast to every
//!   vault concurrently and aggregate, tolerating partial failure
//!   (`broadcast`).

pub mod broadcast;
pub mod forward;
pub mod handlers;
pub mod ring;
pub mod server;
pub mod types;
