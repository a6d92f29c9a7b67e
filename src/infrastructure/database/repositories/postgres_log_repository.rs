use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::ProcessingLog;
use crate::domain::repositories::{
    ProcessingLogRepository, processing_log_repository::ProcessingLogRepositoryError,
};
use crate::infrastructure::database::connection::{DbPool, get_connection_from_pool};
use crate::infrastructure::database::models::{NewProcessingLogModel, ProcessingLogModel};
use crate::infrastructure::database::schema::processing_logs::dsl::*;

pub struct PostgresLogRepository {
    pool: DbPool,
}

impl PostgresLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProcessingLogRepository for PostgresLogRepository {
    async fn append(&self, log: &ProcessingLog) -> Result<(), ProcessingLogRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ProcessingLogRepositoryError::DatabaseError(e.to_string()))?;

        let new_log = NewProcessingLogModel::from(log);

        diesel::insert_into(processing_logs)
            .values(&new_log)
            .execute(&mut conn)
            .map_err(|e| ProcessingLogRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_document_id(
        &self,
        doc_id: Uuid,
    ) -> Result<Vec<ProcessingLog>, ProcessingLogRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ProcessingLogRepositoryError::DatabaseError(e.to_string()))?;

        let models = processing_logs
            .filter(document_id.eq(doc_id))
            .order(created_at.asc())
            .load::<ProcessingLogModel>(&mut conn)
            .map_err(|e| ProcessingLogRepositoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::with_capacity(models.len());
        for model in models {
            let log = ProcessingLog::try_from(model)
                .map_err(ProcessingLogRepositoryError::DatabaseError)?;
            results.push(log);
        }

        Ok(results)
    }
}
