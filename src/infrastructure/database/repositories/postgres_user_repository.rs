use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::User;
use crate::domain::repositories::{UserRepository, user_repository::UserRepositoryError};
use crate::infrastructure::database::connection::{DbPool, get_connection_from_pool};
use crate::infrastructure::database::models::{NewUserModel, UserModel};
use crate::infrastructure::database::schema::users::dsl::*;

pub struct PostgresUserRepository {
    pool: DbPool,
}

impl PostgresUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        let new_user = NewUserModel::from(user);

        // Two concurrent uploads from a fresh user can race here; the
        // unique key on auth_id makes the loser a no-op.
        diesel::insert_into(users)
            .values(&new_user)
            .on_conflict(auth_id)
            .do_nothing()
            .execute(&mut conn)
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_auth_id(&self, auth: &str) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        let result = users
            .filter(auth_id.eq(auth))
            .first::<UserModel>(&mut conn)
            .optional()
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(User::from))
    }
}
