//! Vault Data Types
//!
//! DTOs for the vault's HTTP surface and the on-disk sidecar format.

use crate::index::types::{
    ATTR_FILE_EXTENSION, ATTR_FILE_ID, ATTR_FILE_NAME, ATTR_FILE_SIZE, ATTR_FILE_TYPE,
    ATTR_GROUP_ID, ATTR_RECEIVED_TIME, Record,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Liveness payload shared by both roles. `extended` is a string: empty on a
/// vault, a JSON-encoded fleet summary on the gatekeeper.
#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    pub id: String,
    pub instance: String,
    pub extended: String,
}

/// One file lifted out of a multipart upload, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Sidecar metadata persisted next to every stored content file.
///
/// This exact JSON shape is the recovery format; the field names must
/// round-trip byte-for-byte with what ingest writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    pub file_id: String,
    pub file_type: String,
    pub file_name: String,
    pub file_extension: String,
    pub file_size: String,
    pub received_time: String,
    pub group_id: String,
}

impl FileMeta {
    /// The index record for this file. The record id doubles as the
    /// `fileId` attribute so element lookups work after recovery.
    pub fn to_record(&self) -> Record {
        Record {
            id: self.file_id.clone(),
            attributes: HashMap::from([
                (ATTR_FILE_ID.to_string(), self.file_id.clone()),
                (ATTR_FILE_NAME.to_string(), self.file_name.clone()),
                (ATTR_FILE_EXTENSION.to_string(), self.file_extension.clone()),
                (ATTR_FILE_TYPE.to_string(), self.file_type.clone()),
                (ATTR_FILE_SIZE.to_string(), self.file_size.clone()),
                (ATTR_RECEIVED_TIME.to_string(), self.received_time.clone()),
                (ATTR_GROUP_ID.to_string(), self.group_id.clone()),
            ]),
        }
    }
}
