use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::repositories::{
    DocumentRepository, document_repository::DocumentRepositoryError,
};
use crate::domain::value_objects::DocumentStatus;
use crate::infrastructure::database::connection::{DbPool, get_connection_from_pool};
use crate::infrastructure::database::models::{DocumentModel, NewDocumentModel};
use crate::infrastructure::database::schema::documents::dsl::*;

pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let new_document = NewDocumentModel::from(document);

        diesel::insert_into(documents)
            .values(&new_document)
            .execute(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        document_id: Uuid,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = documents
            .find(document_id)
            .first::<DocumentModel>(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let document = Document::try_from(model)
                    .map_err(DocumentRepositoryError::ValidationError)?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    async fn find_by_user_id(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = documents
            .filter(user_id.eq(owner_id))
            .order(created_at.desc())
            .load::<DocumentModel>(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::with_capacity(models.len());
        for model in models {
            let document =
                Document::try_from(model).map_err(DocumentRepositoryError::ValidationError)?;
            results.push(document);
        }

        Ok(results)
    }

    async fn update(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let update_model = NewDocumentModel::from(document);

        diesel::update(documents.find(document.id()))
            .set(&update_model)
            .execute(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_stale_processing(
        &self,
        older_than: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = documents
            .filter(status.eq(DocumentStatus::Processing.as_str()))
            .filter(updated_at.lt(older_than))
            .load::<DocumentModel>(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::with_capacity(models.len());
        for model in models {
            let document =
                Document::try_from(model).map_err(DocumentRepositoryError::ValidationError)?;
            results.push(document);
        }

        Ok(results)
    }
}
