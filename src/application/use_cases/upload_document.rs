use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::job_queue::SummarizeJob;
use crate::application::ports::{FileStorage, JobQueue};
use crate::domain::entities::{Document, User};
use crate::domain::repositories::{DocumentRepository, UserRepository};

/// Upload size cap; a file of exactly this size is accepted.
pub const MAX_UPLOAD_SIZE: usize = 32 * 1024 * 1024;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Address recorded for lazily created users until a profile sync fills it in.
const PLACEHOLDER_EMAIL: &str = "unknown@example.com";

#[derive(Debug)]
pub enum UploadDocumentError {
    ValidationError(String),
    StorageError(String),
    RepositoryError(String),
}

impl std::fmt::Display for UploadDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadDocumentError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UploadDocumentError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            UploadDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UploadDocumentError {}

#[derive(Debug)]
pub struct UploadDocumentRequest {
    pub auth_id: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub file_data: Vec<u8>,
}

#[derive(Debug)]
pub struct UploadDocumentResponse {
    pub document_id: Uuid,
    pub file_url: String,
    pub file_name: String,
    pub file_size: i64,
}

/// Reject anything that is not a PDF within the size cap before any side
/// effect runs; a failed validation leaves no document row behind.
pub fn validate_upload(
    content_type: Option<&str>,
    size: usize,
) -> Result<(), UploadDocumentError> {
    match content_type {
        Some(PDF_CONTENT_TYPE) => {}
        _ => {
            return Err(UploadDocumentError::ValidationError(
                "Only PDF files are allowed".to_string(),
            ));
        }
    }
    if size > MAX_UPLOAD_SIZE {
        return Err(UploadDocumentError::ValidationError(
            "File size must be at most 32 MiB".to_string(),
        ));
    }
    if size == 0 {
        return Err(UploadDocumentError::ValidationError(
            "File is empty".to_string(),
        ));
    }
    Ok(())
}

pub struct UploadDocumentUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    user_repository: Arc<dyn UserRepository>,
    file_storage: Arc<dyn FileStorage>,
    job_queue: Arc<dyn JobQueue>,
}

impl UploadDocumentUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        user_repository: Arc<dyn UserRepository>,
        file_storage: Arc<dyn FileStorage>,
        job_queue: Arc<dyn JobQueue>,
    ) -> Self {
        Self {
            document_repository,
            user_repository,
            file_storage,
            job_queue,
        }
    }

    pub async fn execute(
        &self,
        request: UploadDocumentRequest,
    ) -> Result<UploadDocumentResponse, UploadDocumentError> {
        validate_upload(request.content_type.as_deref(), request.file_data.len())?;

        let user = self.ensure_user(&request.auth_id).await?;

        let stored = self
            .file_storage
            .store(&request.file_data, &request.file_name)
            .await
            .map_err(|e| UploadDocumentError::StorageError(e.to_string()))?;

        let document = Document::new(
            user.id(),
            request.file_name.clone(),
            stored.url.clone(),
            stored.size,
            stored.storage_key,
        );
        self.document_repository
            .save(&document)
            .await
            .map_err(|e| UploadDocumentError::RepositoryError(e.to_string()))?;

        tracing::info!(
            "Document {} saved for upload {} ({} bytes)",
            document.id(),
            request.file_name,
            stored.size
        );

        // Processing happens on the background workers; the upload response
        // never waits for it. A full queue is reported but does not undo
        // the accepted upload.
        if let Err(e) = self
            .job_queue
            .enqueue(SummarizeJob::new(document.id()))
            .await
        {
            tracing::error!("Failed to enqueue processing for {}: {}", document.id(), e);
        }

        Ok(UploadDocumentResponse {
            document_id: document.id(),
            file_url: stored.url,
            file_name: request.file_name,
            file_size: stored.size,
        })
    }

    async fn ensure_user(&self, auth_id: &str) -> Result<User, UploadDocumentError> {
        match self
            .user_repository
            .find_by_auth_id(auth_id)
            .await
            .map_err(|e| UploadDocumentError::RepositoryError(e.to_string()))?
        {
            Some(user) => Ok(user),
            None => {
                let user = User::new(auth_id.to_string(), PLACEHOLDER_EMAIL.to_string());
                self.user_repository
                    .save(&user)
                    .await
                    .map_err(|e| UploadDocumentError::RepositoryError(e.to_string()))?;
                // The insert is conflict-tolerant, so a concurrent first
                // upload may have won it with a different row id. The row
                // stored under this auth id is the one documents must
                // reference.
                self.user_repository
                    .find_by_auth_id(auth_id)
                    .await
                    .map_err(|e| UploadDocumentError::RepositoryError(e.to_string()))?
                    .ok_or_else(|| {
                        UploadDocumentError::RepositoryError(format!(
                            "User row missing after insert for auth id {}",
                            auth_id
                        ))
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::application::ports::file_storage::{FileStorageError, StoredFile};
    use crate::application::ports::job_queue::JobQueueError;
    use crate::domain::repositories::document_repository::DocumentRepositoryError;
    use crate::domain::repositories::user_repository::UserRepositoryError;

    #[derive(Default)]
    struct InMemoryDocuments {
        rows: Mutex<Vec<Document>>,
    }

    #[async_trait]
    impl DocumentRepository for InMemoryDocuments {
        async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
            self.rows.lock().unwrap().push(document.clone());
            Ok(())
        }

        async fn find_by_id(
            &self,
            id: Uuid,
        ) -> Result<Option<Document>, DocumentRepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|d| d.id() == id)
                .cloned())
        }

        async fn find_by_user_id(
            &self,
            user_id: Uuid,
        ) -> Result<Vec<Document>, DocumentRepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|d| d.user_id() == user_id)
                .cloned()
                .collect())
        }

        async fn update(&self, _document: &Document) -> Result<(), DocumentRepositoryError> {
            Ok(())
        }

        async fn find_stale_processing(
            &self,
            _older_than: chrono::DateTime<chrono::Utc>,
        ) -> Result<Vec<Document>, DocumentRepositoryError> {
            Ok(Vec::new())
        }
    }

    /// User store modelling the losing side of a first-upload race: the
    /// canonical row already exists under the auth id, and a
    /// conflict-tolerant insert of a fresh row is silently dropped.
    struct RaceLosingUsers {
        canonical: User,
        dropped_saves: Mutex<u32>,
        first_lookup_misses: Mutex<bool>,
    }

    impl RaceLosingUsers {
        fn new(canonical: User) -> Self {
            Self {
                canonical,
                dropped_saves: Mutex::new(0),
                first_lookup_misses: Mutex::new(true),
            }
        }
    }

    #[async_trait]
    impl UserRepository for RaceLosingUsers {
        async fn save(&self, _user: &User) -> Result<(), UserRepositoryError> {
            *self.dropped_saves.lock().unwrap() += 1;
            Ok(())
        }

        async fn find_by_auth_id(
            &self,
            auth_id: &str,
        ) -> Result<Option<User>, UserRepositoryError> {
            let mut miss = self.first_lookup_misses.lock().unwrap();
            if *miss {
                *miss = false;
                return Ok(None);
            }
            if self.canonical.auth_id() == auth_id {
                Ok(Some(self.canonical.clone()))
            } else {
                Ok(None)
            }
        }
    }

    struct StaticStorage;

    #[async_trait]
    impl FileStorage for StaticStorage {
        async fn store(
            &self,
            data: &[u8],
            file_name: &str,
        ) -> Result<StoredFile, FileStorageError> {
            Ok(StoredFile {
                url: format!("/uploads/{}", file_name),
                storage_key: file_name.to_string(),
                size: data.len() as i64,
            })
        }
    }

    struct NullQueue;

    #[async_trait]
    impl JobQueue for NullQueue {
        async fn enqueue(&self, _job: SummarizeJob) -> Result<(), JobQueueError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_lost_user_insert_race_still_links_canonical_user() {
        let canonical = User::new("auth-raced".to_string(), "raced@example.com".to_string());
        let users = Arc::new(RaceLosingUsers::new(canonical.clone()));
        let documents = Arc::new(InMemoryDocuments::default());
        let use_case = UploadDocumentUseCase::new(
            documents.clone(),
            users.clone(),
            Arc::new(StaticStorage),
            Arc::new(NullQueue),
        );

        let response = use_case
            .execute(UploadDocumentRequest {
                auth_id: "auth-raced".to_string(),
                file_name: "report.pdf".to_string(),
                content_type: Some("application/pdf".to_string()),
                file_data: b"%PDF-1.4 race".to_vec(),
            })
            .await
            .unwrap();

        assert_eq!(*users.dropped_saves.lock().unwrap(), 1);
        let saved = documents
            .find_by_id(response.document_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.user_id(), canonical.id());
    }

    #[test]
    fn test_rejects_non_pdf() {
        assert!(validate_upload(Some("image/png"), 1024).is_err());
        assert!(validate_upload(None, 1024).is_err());
    }

    #[test]
    fn test_accepts_pdf_within_limit() {
        assert!(validate_upload(Some("application/pdf"), 1024).is_ok());
    }

    #[test]
    fn test_size_boundary() {
        assert!(validate_upload(Some("application/pdf"), MAX_UPLOAD_SIZE).is_ok());
        assert!(validate_upload(Some("application/pdf"), MAX_UPLOAD_SIZE + 1).is_err());
    }

    #[test]
    fn test_rejects_empty_file() {
        assert!(validate_upload(Some("application/pdf"), 0).is_err());
    }
}
