//! Filesystem Primitives
//!
//! Thin wrappers over `tokio::fs` scoped to the vault layout
//! (`root/<dir>/<name>`), plus extension and content-type helpers.

use anyhow::Result;
use std::path::Path;

pub async fn create_dir_if_missing(root: &Path, name: &str) -> Result<()> {
    let path = root.join(name);
    if !tokio::fs::try_exists(&path).await? {
        tokio::fs::create_dir_all(&path).await?;
    }
    Ok(())
}

/// Writes `data` unless the target already exists; the first write wins.
pub async fn save_bytes(root: &Path, dir: &str, name: &str, data: &[u8]) -> Result<()> {
    let path = root.join(dir).join(name);
    if tokio::fs::try_exists(&path).await? {
        return Ok(());
    }
    tokio::fs::write(&path, data).await?;
    Ok(())
}

/// Reads a file and pairs it with the content type its extension implies.
pub async fn read_bytes(root: &Path, dir: &str, name: &str) -> Result<(Vec<u8>, &'static str)> {
    let path = root.join(dir).join(name);
    let data = tokio::fs::read(&path).await?;
    Ok((data, content_type_for(name)))
}

pub async fn delete_file(root: &Path, dir: &str, name: &str) -> Result<()> {
    tokio::fs::remove_file(root.join(dir).join(name)).await?;
    Ok(())
}

/// Removes a directory with all its contents. Missing directories are fine.
pub async fn delete_dir(root: &Path, name: &str) -> Result<()> {
    match tokio::fs::remove_dir_all(root.join(name)).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// The suffix from the last dot of `name`, dot included; empty when `name`
/// has no dot. Mirrors how stored file names are assembled
/// (`<fileId><extension>`).
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) => name[idx..].to_string(),
        None => String::new(),
    }
}

/// Content type implied by a file name's extension.
pub fn content_type_for(name: &str) -> &'static str {
    match file_extension(name).trim_start_matches('.').to_lowercase().as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "csv" => "text/csv",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        _ => "application/octet-stream",
    }
}
