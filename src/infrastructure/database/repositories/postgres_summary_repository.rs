use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Summary;
use crate::domain::repositories::{SummaryRepository, summary_repository::SummaryRepositoryError};
use crate::infrastructure::database::connection::{DbPool, get_connection_from_pool};
use crate::infrastructure::database::models::{NewSummaryModel, SummaryModel};
use crate::infrastructure::database::schema::summaries::dsl::*;

pub struct PostgresSummaryRepository {
    pool: DbPool,
}

impl PostgresSummaryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryRepository for PostgresSummaryRepository {
    async fn upsert(&self, summary: &Summary) -> Result<(), SummaryRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| SummaryRepositoryError::DatabaseError(e.to_string()))?;

        let new_summary = NewSummaryModel::from(summary);

        // `document_id` is unique, so a retried pipeline replaces its own
        // earlier row instead of inserting a duplicate.
        diesel::insert_into(summaries)
            .values(&new_summary)
            .on_conflict(document_id)
            .do_update()
            .set(&new_summary)
            .execute(&mut conn)
            .map_err(|e| SummaryRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_document_id(
        &self,
        doc_id: Uuid,
    ) -> Result<Option<Summary>, SummaryRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| SummaryRepositoryError::DatabaseError(e.to_string()))?;

        let result = summaries
            .filter(document_id.eq(doc_id))
            .first::<SummaryModel>(&mut conn)
            .optional()
            .map_err(|e| SummaryRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let summary =
                    Summary::try_from(model).map_err(SummaryRepositoryError::ValidationError)?;
                Ok(Some(summary))
            }
            None => Ok(None),
        }
    }

    async fn find_by_id_or_document_id(
        &self,
        lookup_id: Uuid,
    ) -> Result<Option<Summary>, SummaryRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| SummaryRepositoryError::DatabaseError(e.to_string()))?;

        let result = summaries
            .filter(id.eq(lookup_id).or(document_id.eq(lookup_id)))
            .first::<SummaryModel>(&mut conn)
            .optional()
            .map_err(|e| SummaryRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let summary =
                    Summary::try_from(model).map_err(SummaryRepositoryError::ValidationError)?;
                Ok(Some(summary))
            }
            None => Ok(None),
        }
    }
}
