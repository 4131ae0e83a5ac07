//! Index Recovery
//!
//! Rebuilds the inverted index purely from the filesystem at startup. Runs
//! once, before the vault serves traffic, with no concurrent writers; any
//! inconsistency is fatal, because a vault must not come up with a partial
//! index.

use super::fs::file_extension;
use super::ingest::META_SUFFIX;
use crate::index::engine::Index;
use crate::index::types::{ATTR_FILE_ID, Record};
use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Scans every group directory under `root` and re-adds one record per
/// content file from its `._meta` sidecar.
///
/// Fatal conditions: a directory nested inside a group, a content file
/// without a sidecar, unreadable or malformed sidecar JSON, and a sidecar
/// missing its `fileId` attribute. Stray plain files at the top level are
/// skipped. The record id is the persisted `fileId`, so id-based lookups
/// keep working across restarts.
pub fn rebuild_index(root: &Path) -> Result<Index> {
    let mut index = Index::new();

    let entries =
        fs::read_dir(root).with_context(|| format!("reading vault root {}", root.display()))?;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let group_path = entry.path();
        let mut names = Vec::new();
        for file in fs::read_dir(&group_path)? {
            let file = file?;
            if file.file_type()?.is_dir() {
                bail!(
                    "unexpected directory in group folder: {}",
                    file.path().display()
                );
            }
            names.push(file.file_name().to_string_lossy().into_owned());
        }

        for name in &names {
            if name.ends_with(META_SUFFIX) {
                continue;
            }

            let extension = file_extension(name);
            let stem = &name[..name.len() - extension.len()];
            let meta_path = group_path.join(format!("{}{}", stem, META_SUFFIX));
            if !meta_path.exists() {
                bail!(
                    "missing meta file for record: {}",
                    group_path.join(name).display()
                );
            }

            let meta_bytes = fs::read(&meta_path)
                .with_context(|| format!("reading sidecar {}", meta_path.display()))?;
            let attributes: HashMap<String, String> = serde_json::from_slice(&meta_bytes)
                .with_context(|| format!("parsing sidecar {}", meta_path.display()))?;

            let Some(id) = attributes.get(ATTR_FILE_ID).cloned() else {
                bail!("sidecar has no fileId attribute: {}", meta_path.display());
            };

            index.add(Record { id, attributes });
        }
    }

    Ok(index)
}
