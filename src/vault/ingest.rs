//! Concurrent Ingest Pipeline
//!
//! Persists a batch of uploaded files in parallel: one task per file, each
//! writing the sidecar metadata and then the content bytes, results
//! collected into per-task slots behind an explicit join barrier.

use super::fs;
use super::types::{FileMeta, UploadedFile};
use anyhow::{Result, anyhow, bail};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Suffix distinguishing sidecar metadata files from content files.
pub const META_SUFFIX: &str = "._meta";

/// Processes every uploaded file concurrently and returns their metadata in
/// submission order.
///
/// Every worker runs to completion before this returns; failures are
/// gathered from the join results, so a failing worker can never block
/// another. Any failure fails the whole batch; files that were already
/// written stay on disk.
pub async fn process_files(
    files: Vec<UploadedFile>,
    group_id: &str,
    root: &Path,
) -> Result<Vec<FileMeta>> {
    let total = files.len();

    let mut handles = Vec::with_capacity(total);
    for file in files {
        let group_id = group_id.to_string();
        let root = root.to_path_buf();
        handles.push(tokio::spawn(async move {
            process_file(file, &group_id, &root).await
        }));
    }

    let mut metadata = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(Ok(meta)) => metadata.push(meta),
            Ok(Err(e)) => failures.push(e),
            Err(e) => failures.push(anyhow!(e)),
        }
    }

    if !failures.is_empty() {
        bail!(
            "failed to store {} of {} files: {}",
            failures.len(),
            total,
            failures[0]
        );
    }

    Ok(metadata)
}

/// Persists one file: sidecar first, content second, so a content file on
/// disk always has its metadata next to it.
async fn process_file(file: UploadedFile, group_id: &str, root: &Path) -> Result<FileMeta> {
    let file_id = Uuid::new_v4().simple().to_string();
    let extension = fs::file_extension(&file.name);

    let meta = FileMeta {
        file_id: file_id.clone(),
        file_type: file.content_type,
        file_name: file.name,
        file_extension: extension.clone(),
        file_size: file.bytes.len().to_string(),
        received_time: now_ms().to_string(),
        group_id: group_id.to_string(),
    };

    let meta_bytes = serde_json::to_vec(&meta)?;
    fs::save_bytes(
        root,
        group_id,
        &format!("{}{}", file_id, META_SUFFIX),
        &meta_bytes,
    )
    .await?;
    fs::save_bytes(
        root,
        group_id,
        &format!("{}{}", file_id, extension),
        &file.bytes,
    )
    .await?;

    Ok(meta)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
