use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Summary;
use crate::domain::repositories::{DocumentRepository, SummaryRepository, UserRepository};

#[derive(Debug)]
pub enum GetSummaryError {
    SummaryNotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for GetSummaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetSummaryError::SummaryNotFound(id) => write!(f, "Summary not found: {}", id),
            GetSummaryError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetSummaryError {}

pub struct GetSummaryUseCase {
    summary_repository: Arc<dyn SummaryRepository>,
    document_repository: Arc<dyn DocumentRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl GetSummaryUseCase {
    pub fn new(
        summary_repository: Arc<dyn SummaryRepository>,
        document_repository: Arc<dyn DocumentRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            summary_repository,
            document_repository,
            user_repository,
        }
    }

    /// Accepts either a summary id or a document id; clients historically
    /// pass both interchangeably. Ownership is enforced through the backing
    /// document; a foreign summary reads as not found.
    pub async fn execute(&self, auth_id: &str, id: Uuid) -> Result<Summary, GetSummaryError> {
        let summary = self
            .summary_repository
            .find_by_id_or_document_id(id)
            .await
            .map_err(|e| GetSummaryError::RepositoryError(e.to_string()))?
            .ok_or(GetSummaryError::SummaryNotFound(id))?;

        let document = self
            .document_repository
            .find_by_id(summary.document_id())
            .await
            .map_err(|e| GetSummaryError::RepositoryError(e.to_string()))?
            .ok_or(GetSummaryError::SummaryNotFound(id))?;

        let owner = self
            .user_repository
            .find_by_auth_id(auth_id)
            .await
            .map_err(|e| GetSummaryError::RepositoryError(e.to_string()))?;
        match owner {
            Some(user) if user.id() == document.user_id() => Ok(summary),
            _ => Err(GetSummaryError::SummaryNotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::entities::{Document, User};
    use crate::domain::repositories::document_repository::DocumentRepositoryError;
    use crate::domain::repositories::summary_repository::SummaryRepositoryError;
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

    #[derive(Default)]
    struct InMemorySummaries {
        rows: Mutex<Vec<Summary>>,
    }

    #[async_trait]
    impl SummaryRepository for InMemorySummaries {
        async fn upsert(&self, summary: &Summary) -> Result<(), SummaryRepositoryError> {
            self.rows.lock().unwrap().push(summary.clone());
            Ok(())
        }

        async fn find_by_document_id(
            &self,
            document_id: Uuid,
        ) -> Result<Option<Summary>, SummaryRepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.document_id() == document_id)
                .cloned())
        }

        async fn find_by_id_or_document_id(
            &self,
            id: Uuid,
        ) -> Result<Option<Summary>, SummaryRepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id() == id || s.document_id() == id)
                .cloned())
        }
    }

    #[derive(Default)]
    struct InMemoryUsers {
        rows: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for InMemoryUsers {
        async fn save(&self, user: &User) -> Result<(), UserRepositoryError> {
            self.rows.lock().unwrap().push(user.clone());
            Ok(())
        }

        async fn find_by_auth_id(
            &self,
            auth_id: &str,
        ) -> Result<Option<User>, UserRepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.auth_id() == auth_id)
                .cloned())
        }
    }

    struct Fixture {
        use_case: GetSummaryUseCase,
        summary: Summary,
        document: Document,
    }

    async fn fixture() -> Fixture {
        let documents = Arc::new(InMemoryDocuments::default());
        let summaries = Arc::new(InMemorySummaries::default());
        let users = Arc::new(InMemoryUsers::default());

        let owner = User::new("auth-owner".to_string(), "owner@example.com".to_string());
        users.save(&owner).await.unwrap();
        let other = User::new("auth-other".to_string(), "other@example.com".to_string());
        users.save(&other).await.unwrap();

        let document = Document::new(
            owner.id(),
            "report.pdf".to_string(),
            "/uploads/report.pdf".to_string(),
            2048,
            "abc123-report.pdf".to_string(),
        );
        documents.save(&document).await.unwrap();

        let summary = Summary::new(
            document.id(),
            "Report".to_string(),
            "Overview of the report.".to_string(),
            vec![],
            vec![],
            vec![],
            4,
            2,
            "offline-mock".to_string(),
        );
        summaries.upsert(&summary).await.unwrap();

        let use_case = GetSummaryUseCase::new(summaries, documents, users);
        Fixture {
            use_case,
            summary,
            document,
        }
    }

    #[tokio::test]
    async fn test_lookup_by_summary_id() {
        let fixture = fixture().await;

        let found = fixture
            .use_case
            .execute("auth-owner", fixture.summary.id())
            .await
            .unwrap();

        assert_eq!(found.id(), fixture.summary.id());
    }

    #[tokio::test]
    async fn test_lookup_by_document_id() {
        let fixture = fixture().await;

        let found = fixture
            .use_case
            .execute("auth-owner", fixture.document.id())
            .await
            .unwrap();

        assert_eq!(found.id(), fixture.summary.id());
    }

    #[tokio::test]
    async fn test_foreign_summary_reads_as_not_found() {
        let fixture = fixture().await;

        let result = fixture
            .use_case
            .execute("auth-other", fixture.summary.id())
            .await;

        assert!(matches!(result, Err(GetSummaryError::SummaryNotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let fixture = fixture().await;

        let result = fixture.use_case.execute("auth-owner", Uuid::new_v4()).await;

        assert!(matches!(result, Err(GetSummaryError::SummaryNotFound(_))));
    }
}
