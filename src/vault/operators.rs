use super::fs;
use super::ingest::{self, META_SUFFIX};
use super::types::{FileMeta, UploadedFile};
use crate::config::VaultConfig;
use crate::index::engine::Index;
use crate::index::types::{ATTR_FILE_EXTENSION, ATTR_FILE_ID, ATTR_GROUP_ID, Record};
use anyhow::{Result, bail};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// Per-node state shared across handlers.
///
/// The `RwLock` is the single mutual-exclusion domain for the paired index
/// structures: one writer at a time, readers concurrent with each other but
/// never with a writer.
pub struct VaultState {
    pub config: VaultConfig,
    pub index: RwLock<Index>,
}

impl VaultState {
    pub fn new(config: VaultConfig, index: Index) -> Self {
        Self {
            config,
            index: RwLock::new(index),
        }
    }

    /// Unique group ids known to this vault.
    pub async fn get_groups(&self) -> Vec<String> {
        let index = self.index.read().await;
        let records = index.search_all(&[ATTR_GROUP_ID.to_string()]);

        // search_all returns one entry per bucket hit; dedupe by value.
        let mut seen = HashSet::new();
        let mut groups = Vec::new();
        for record in records {
            if let Some(group) = record.attributes.get(ATTR_GROUP_ID)
                && seen.insert(group.clone())
            {
                groups.push(group.clone());
            }
        }

        groups
    }

    /// Stores a batch of uploaded files under a group and indexes them.
    pub async fn put_group(
        &self,
        group_id: &str,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<FileMeta>> {
        fs::create_dir_if_missing(&self.config.root, group_id).await?;

        let metadata = ingest::process_files(files, group_id, &self.config.root).await?;

        // One write acquisition for the whole batch keeps readers from
        // observing a half-indexed upload.
        let mut index = self.index.write().await;
        for meta in &metadata {
            index.add(meta.to_record());
        }

        Ok(metadata)
    }

    /// Every record stored under a group.
    pub async fn records_in_group(&self, group_id: &str) -> Vec<Record> {
        let index = self.index.read().await;
        let query = HashMap::from([(ATTR_GROUP_ID.to_string(), group_id.to_string())]);
        index.search_any(&query)
    }

    /// Deletes a group directory and unindexes every record in it.
    pub async fn delete_group(&self, group_id: &str) -> Result<()> {
        fs::delete_dir(&self.config.root, group_id).await?;

        let mut index = self.index.write().await;
        let query = HashMap::from([(ATTR_GROUP_ID.to_string(), group_id.to_string())]);
        for record in index.search_any(&query) {
            index.remove(&record);
        }

        Ok(())
    }

    /// Reads one element's content bytes, paired with the content type its
    /// extension implies.
    pub async fn get_element(&self, element_id: &str) -> Result<(Vec<u8>, &'static str)> {
        let (group_id, file_name) = {
            let index = self.index.read().await;
            let Some(attributes) = index.get_attributes(element_id) else {
                bail!("record not found");
            };
            let group_id = attributes.get(ATTR_GROUP_ID).cloned().unwrap_or_default();
            let file_name = format!(
                "{}{}",
                attributes.get(ATTR_FILE_ID).cloned().unwrap_or_default(),
                attributes
                    .get(ATTR_FILE_EXTENSION)
                    .cloned()
                    .unwrap_or_default(),
            );
            (group_id, file_name)
        };

        fs::read_bytes(&self.config.root, &group_id, &file_name).await
    }

    /// Unindexes one element, then deletes its content and sidecar files.
    pub async fn delete_element(&self, element_id: &str) -> Result<()> {
        let record = {
            let mut index = self.index.write().await;
            let record = index.get(element_id);
            if record.attributes.is_empty() {
                bail!("record not found");
            }
            // The stored attributes are removed exactly as they were added.
            index.remove(&record);
            record
        };

        let group_id = record.attributes.get(ATTR_GROUP_ID).cloned().unwrap_or_default();
        let file_id = record.attributes.get(ATTR_FILE_ID).cloned().unwrap_or_default();
        let extension = record
            .attributes
            .get(ATTR_FILE_EXTENSION)
            .cloned()
            .unwrap_or_default();

        fs::delete_file(
            &self.config.root,
            &group_id,
            &format!("{}{}", file_id, extension),
        )
        .await?;
        fs::delete_file(
            &self.config.root,
            &group_id,
            &format!("{}{}", file_id, META_SUFFIX),
        )
        .await?;

        Ok(())
    }
}
