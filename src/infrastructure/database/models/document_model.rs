use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Document as DomainDocument;
use crate::domain::value_objects::DocumentStatus;
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub storage_key: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub storage_key: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&DomainDocument> for NewDocumentModel {
    fn from(document: &DomainDocument) -> Self {
        Self {
            id: document.id(),
            user_id: document.user_id(),
            file_name: document.file_name().to_string(),
            file_url: document.file_url().to_string(),
            file_size: document.file_size(),
            storage_key: document.storage_key().to_string(),
            status: document.status().as_str().to_string(),
            created_at: document.created_at(),
            updated_at: document.updated_at(),
        }
    }
}

impl TryFrom<DocumentModel> for DomainDocument {
    type Error = String;

    fn try_from(model: DocumentModel) -> Result<Self, Self::Error> {
        let status = DocumentStatus::from_str(&model.status)?;

        Ok(DomainDocument::from_database(
            model.id,
            model.user_id,
            model.file_name,
            model.file_url,
            model.file_size,
            model.storage_key,
            status,
            model.created_at,
            model.updated_at,
        ))
    }
}
