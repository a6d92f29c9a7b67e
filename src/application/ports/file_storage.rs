use async_trait::async_trait;

#[derive(Debug)]
pub enum FileStorageError {
    IoError(String),
    InvalidPath(String),
}

impl std::fmt::Display for FileStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStorageError::IoError(msg) => write!(f, "IO error: {}", msg),
            FileStorageError::InvalidPath(path) => write!(f, "Invalid path: {}", path),
        }
    }
}

impl std::error::Error for FileStorageError {}

/// What the upload provider hands back: a fetchable URL, the provider's
/// storage key for the object, and the stored size.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub url: String,
    pub storage_key: String,
    pub size: i64,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn store(&self, data: &[u8], file_name: &str) -> Result<StoredFile, FileStorageError>;
}
