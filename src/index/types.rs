//! Index Data Types
//!
//! The record shape shared by the index engine, the ingest pipeline and the
//! HTTP layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Attribute names written by the ingest pipeline. The engine itself treats
// attribute names as opaque strings; these constants exist so the vault and
// the recovery scan agree on spelling.
pub const ATTR_FILE_ID: &str = "fileId";
pub const ATTR_FILE_NAME: &str = "fileName";
pub const ATTR_FILE_EXTENSION: &str = "fileExtension";
pub const ATTR_FILE_TYPE: &str = "fileType";
pub const ATTR_FILE_SIZE: &str = "fileSize";
pub const ATTR_RECEIVED_TIME: &str = "receivedTime";
pub const ATTR_GROUP_ID: &str = "groupId";

/// One stored file plus its descriptive metadata.
///
/// The id is an opaque string; attributes map names to single string values.
/// A `Record` is what every search operation returns and what callers must
/// pass back (unmodified) when removing an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub attributes: HashMap<String, String>,
}
