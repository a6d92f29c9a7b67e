use std::path::PathBuf;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::application::ports::file_storage::{FileStorage, FileStorageError, StoredFile};

/// Disk-backed storage under a configurable upload directory. The returned
/// URL is the absolute path of the stored file, which the extractor reads
/// directly.
pub struct LocalFileStorage {
    upload_dir: PathBuf,
}

impl LocalFileStorage {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }
}

/// Keeps alphanumerics, dots, dashes and underscores; everything else becomes
/// an underscore so the name is safe as a path component.
pub fn sanitize_file_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('_').is_empty() {
        "upload.pdf".to_string()
    } else {
        cleaned
    }
}

fn content_digest_prefix(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest
        .iter()
        .take(8)
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, data: &[u8], file_name: &str) -> Result<StoredFile, FileStorageError> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))?;

        // Content hash in the key keeps re-uploads of different files with
        // the same name from colliding.
        let storage_key = format!(
            "{}-{}",
            content_digest_prefix(data),
            sanitize_file_name(file_name)
        );
        let path = self.upload_dir.join(&storage_key);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))?;

        let url = path
            .to_str()
            .ok_or_else(|| FileStorageError::InvalidPath(path.display().to_string()))?
            .to_string();

        Ok(StoredFile {
            url,
            storage_key,
            size: data.len() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(
            sanitize_file_name("my report (final).pdf"),
            "my_report__final_.pdf"
        );
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
    }

    #[test]
    fn test_sanitize_falls_back_for_empty_names() {
        assert_eq!(sanitize_file_name("///"), "upload.pdf");
    }

    #[tokio::test]
    async fn test_store_writes_file_and_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path());

        let stored = storage.store(b"%PDF-1.4 test bytes", "doc.pdf").await.unwrap();

        assert_eq!(stored.size, 19);
        assert!(stored.storage_key.ends_with("doc.pdf"));
        let on_disk = tokio::fs::read(&stored.url).await.unwrap();
        assert_eq!(on_disk, b"%PDF-1.4 test bytes");
    }

    #[tokio::test]
    async fn test_same_name_different_content_gets_distinct_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path());

        let first = storage.store(b"first version", "doc.pdf").await.unwrap();
        let second = storage.store(b"second version", "doc.pdf").await.unwrap();

        assert_ne!(first.storage_key, second.storage_key);
    }
}
