//! Vault Module
//!
//! A storage node. Stateless toward clients, stateful on disk: opaque blobs
//! live under `root/<groupId>/`, each next to a `._meta` sidecar holding its
//! attribute map, and an in-memory inverted index answers attribute queries.
//!
//! ## Core Concepts
//! - **Ingest**: multipart uploads fan out to one task per file; content and
//!   sidecar are both on disk before the batch is indexed (`ingest`).
//! - **Recovery**: at startup the index is rebuilt purely from the sidecar
//!   files; any inconsistency aborts the process before it serves traffic
//!   (`recovery`).
//! - **Serialization**: a single `RwLock` guards the index so add/remove
//!   never interleave with readers (`operators`).

pub mod fs;
pub mod handlers;
pub mod ingest;
pub mod operators;
pub mod recovery;
pub mod server;
pub mod types;

#[cfg(test)]
mod tests;
