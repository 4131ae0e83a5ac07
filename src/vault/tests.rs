//! Vault Module Tests
//!
//! Validates the storage node's disk layout, ingest pipeline and recovery
//! scan against real temporary directories.
//!
//! ## Test Scopes
//! - **Ingest**: concurrent persistence, sidecar format, failure handling.
//! - **Operators**: group and element lifecycle over the locked index.
//! - **Recovery**: round-trip fidelity and fatal inconsistencies.

#[cfg(test)]
mod tests {
    use crate::config::VaultConfig;
    use crate::index::types::{ATTR_FILE_ID, ATTR_FILE_NAME, ATTR_GROUP_ID};
    use crate::vault::fs::{content_type_for, file_extension};
    use crate::vault::ingest::{META_SUFFIX, process_files};
    use crate::vault::operators::VaultState;
    use crate::vault::recovery::rebuild_index;
    use crate::vault::types::{FileMeta, UploadedFile};
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    fn upload(name: &str, content_type: &str, bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            content_type: content_type.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    fn state(root: &Path) -> VaultState {
        let config = VaultConfig {
            id: "vault-test".to_string(),
            root: root.to_path_buf(),
            port: 0,
            max_upload_size: 32 * 1024 * 1024,
            in_memory_upload_size: 8 * 1024 * 1024,
        };
        VaultState::new(config, crate::index::engine::Index::new())
    }

    // ============================================================
    // HELPERS
    // ============================================================

    #[test]
    fn test_file_extension_variants() {
        assert_eq!(file_extension("report.pdf"), ".pdf");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
        assert_eq!(file_extension("noext"), "");
        assert_eq!(file_extension(".bashrc"), ".bashrc");
    }

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type_for("report.pdf"), "application/pdf");
        assert_eq!(content_type_for("photo.JPG"), "image/jpeg");
        assert_eq!(content_type_for("mystery.bin"), "application/octet-stream");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    // ============================================================
    // INGEST PIPELINE
    // ============================================================

    #[tokio::test]
    async fn test_ingest_writes_content_and_sidecar() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir(root.join("g1")).unwrap();

        let files = vec![upload("report.pdf", "application/pdf", b"%PDF-fake")];
        let metadata = process_files(files, "g1", root).await.unwrap();
        assert_eq!(metadata.len(), 1);

        let meta = &metadata[0];
        assert_eq!(meta.file_name, "report.pdf");
        assert_eq!(meta.file_extension, ".pdf");
        assert_eq!(meta.file_type, "application/pdf");
        assert_eq!(meta.file_size, "9");
        assert_eq!(meta.group_id, "g1");

        let content_path = root.join("g1").join(format!("{}.pdf", meta.file_id));
        assert_eq!(std::fs::read(&content_path).unwrap(), b"%PDF-fake");

        let meta_path = root
            .join("g1")
            .join(format!("{}{}", meta.file_id, META_SUFFIX));
        let persisted: FileMeta =
            serde_json::from_slice(&std::fs::read(&meta_path).unwrap()).unwrap();
        assert_eq!(persisted.file_id, meta.file_id);
        assert_eq!(persisted.file_name, "report.pdf");
    }

    #[tokio::test]
    async fn test_ingest_preserves_slot_order() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir(root.join("g1")).unwrap();

        let files = vec![
            upload("a.txt", "text/plain", b"a"),
            upload("b.txt", "text/plain", b"b"),
            upload("c.txt", "text/plain", b"c"),
        ];
        let metadata = process_files(files, "g1", root).await.unwrap();

        let names: Vec<&str> = metadata.iter().map(|m| m.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[tokio::test]
    async fn test_ingest_with_concurrent_failures_terminates() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        // The group directory is never created, so every worker fails at
        // the same time. The batch must report failure without hanging.
        let files = (0..5)
            .map(|i| upload(&format!("f{}.txt", i), "text/plain", b"data"))
            .collect();

        let result = tokio::time::timeout(
            Duration::from_secs(10),
            process_files(files, "missing", root),
        )
        .await
        .expect("ingest must terminate even when every worker fails");

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_ingest_repeated_failures_do_not_deadlock() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        for _ in 0..20 {
            let files = (0..4)
                .map(|i| upload(&format!("f{}.txt", i), "text/plain", b"data"))
                .collect();
            let result = tokio::time::timeout(
                Duration::from_secs(10),
                process_files(files, "missing", root),
            )
            .await
            .expect("ingest must terminate on every run");
            assert!(result.is_err());
        }
    }

    // ============================================================
    // OPERATORS (group/element lifecycle)
    // ============================================================

    #[tokio::test]
    async fn test_upload_list_fetch_delete_roundtrip() {
        let dir = TempDir::new().unwrap();
        let state = state(dir.path());

        let metadata = state
            .put_group(
                "g1",
                vec![upload("report.pdf", "application/pdf", b"%PDF-fake")],
            )
            .await
            .unwrap();
        let file_id = metadata[0].file_id.clone();

        // List the group.
        let records = state.records_in_group("g1").await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attributes.get(ATTR_FILE_NAME).unwrap(), "report.pdf");
        assert_eq!(records[0].attributes.get(ATTR_GROUP_ID).unwrap(), "g1");

        // Fetch the element bytes.
        let (bytes, content_type) = state.get_element(&file_id).await.unwrap();
        assert_eq!(bytes, b"%PDF-fake");
        assert_eq!(content_type, "application/pdf");

        // Delete the element: listing empties and both files disappear.
        state.delete_element(&file_id).await.unwrap();
        assert!(state.records_in_group("g1").await.is_empty());
        assert!(!dir.path().join("g1").join(format!("{}.pdf", file_id)).exists());
        assert!(
            !dir.path()
                .join("g1")
                .join(format!("{}{}", file_id, META_SUFFIX))
                .exists()
        );
    }

    #[tokio::test]
    async fn test_get_element_unknown_id_fails() {
        let dir = TempDir::new().unwrap();
        let state = state(dir.path());

        assert!(state.get_element("nope").await.is_err());
        assert!(state.delete_element("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_get_groups_is_deduplicated() {
        let dir = TempDir::new().unwrap();
        let state = state(dir.path());

        state
            .put_group(
                "g1",
                vec![
                    upload("a.txt", "text/plain", b"a"),
                    upload("b.txt", "text/plain", b"b"),
                ],
            )
            .await
            .unwrap();
        state
            .put_group("g2", vec![upload("c.txt", "text/plain", b"c")])
            .await
            .unwrap();

        let mut groups = state.get_groups().await;
        groups.sort();
        assert_eq!(groups, vec!["g1", "g2"]);
    }

    #[tokio::test]
    async fn test_delete_group_removes_directory_and_records() {
        let dir = TempDir::new().unwrap();
        let state = state(dir.path());

        state
            .put_group("g1", vec![upload("a.txt", "text/plain", b"a")])
            .await
            .unwrap();
        state
            .put_group("g2", vec![upload("b.txt", "text/plain", b"b")])
            .await
            .unwrap();

        state.delete_group("g1").await.unwrap();

        assert!(!dir.path().join("g1").exists());
        assert!(state.records_in_group("g1").await.is_empty());
        assert_eq!(state.get_groups().await, vec!["g2"]);
    }

    #[tokio::test]
    async fn test_delete_missing_group_is_ok() {
        let dir = TempDir::new().unwrap();
        let state = state(dir.path());

        assert!(state.delete_group("never-existed").await.is_ok());
    }

    // ============================================================
    // RECOVERY
    // ============================================================

    #[tokio::test]
    async fn test_recovery_roundtrip_reproduces_index() {
        let dir = TempDir::new().unwrap();
        let state = state(dir.path());

        let metadata = state
            .put_group(
                "g1",
                vec![
                    upload("a.txt", "text/plain", b"aaa"),
                    upload("b.pdf", "application/pdf", b"bbb"),
                ],
            )
            .await
            .unwrap();
        state
            .put_group("g2", vec![upload("c.txt", "text/plain", b"ccc")])
            .await
            .unwrap();

        let recovered = rebuild_index(dir.path()).unwrap();
        assert_eq!(recovered.len(), 3);

        // Every record must come back under its original id with the exact
        // attribute set the ingest run wrote.
        let live = state.index.read().await;
        for meta in &metadata {
            let original = live.get(&meta.file_id);
            let restored = recovered.get(&meta.file_id);
            assert!(!restored.attributes.is_empty());
            assert_eq!(original.attributes, restored.attributes);
        }
    }

    #[test]
    fn test_recovery_reuses_persisted_id() {
        let dir = TempDir::new().unwrap();
        let group = dir.path().join("g1");
        std::fs::create_dir(&group).unwrap();

        let sidecar = r#"{
            "fileId": "abc123",
            "fileType": "text/plain",
            "fileName": "a.txt",
            "fileExtension": ".txt",
            "fileSize": "3",
            "receivedTime": "1700000000000",
            "groupId": "g1"
        }"#;
        std::fs::write(group.join("abc123._meta"), sidecar).unwrap();
        std::fs::write(group.join("abc123.txt"), b"aaa").unwrap();

        let index = rebuild_index(dir.path()).unwrap();
        let record = index.get("abc123");
        assert_eq!(record.attributes.get(ATTR_FILE_ID).unwrap(), "abc123");
        assert_eq!(record.attributes.get(ATTR_GROUP_ID).unwrap(), "g1");
    }

    #[test]
    fn test_recovery_missing_sidecar_is_fatal() {
        let dir = TempDir::new().unwrap();
        let group = dir.path().join("g1");
        std::fs::create_dir(&group).unwrap();
        std::fs::write(group.join("orphan.txt"), b"data").unwrap();

        let err = rebuild_index(dir.path()).unwrap_err();
        assert!(err.to_string().contains("missing meta file"));
    }

    #[test]
    fn test_recovery_nested_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let group = dir.path().join("g1");
        std::fs::create_dir_all(group.join("nested")).unwrap();

        let err = rebuild_index(dir.path()).unwrap_err();
        assert!(err.to_string().contains("unexpected directory"));
    }

    #[test]
    fn test_recovery_malformed_sidecar_is_fatal() {
        let dir = TempDir::new().unwrap();
        let group = dir.path().join("g1");
        std::fs::create_dir(&group).unwrap();
        std::fs::write(group.join("abc._meta"), b"not json").unwrap();
        std::fs::write(group.join("abc.txt"), b"data").unwrap();

        assert!(rebuild_index(dir.path()).is_err());
    }

    #[test]
    fn test_recovery_sidecar_without_file_id_is_fatal() {
        let dir = TempDir::new().unwrap();
        let group = dir.path().join("g1");
        std::fs::create_dir(&group).unwrap();
        std::fs::write(group.join("abc._meta"), br#"{"groupId": "g1"}"#).unwrap();
        std::fs::write(group.join("abc.txt"), b"data").unwrap();

        let err = rebuild_index(dir.path()).unwrap_err();
        assert!(err.to_string().contains("fileId"));
    }

    #[test]
    fn test_recovery_skips_stray_top_level_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("stray.txt"), b"ignore me").unwrap();

        let index = rebuild_index(dir.path()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_recovery_of_empty_root() {
        let dir = TempDir::new().unwrap();
        let index = rebuild_index(dir.path()).unwrap();
        assert!(index.is_empty());
    }
}
