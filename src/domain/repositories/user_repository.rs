use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::User;

#[derive(Debug)]
pub enum UserRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    DuplicateError(String),
}

impl std::fmt::Display for UserRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRepositoryError::NotFound(id) => write!(f, "User not found: {}", id),
            UserRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            UserRepositoryError::DuplicateError(msg) => write!(f, "Duplicate error: {}", msg),
        }
    }
}

impl std::error::Error for UserRepositoryError {}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError>;
    async fn find_by_auth_id(&self, auth_id: &str) -> Result<Option<User>, UserRepositoryError>;
}
