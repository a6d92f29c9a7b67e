use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::User as DomainUser;
use crate::infrastructure::database::schema::users;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserModel {
    pub id: Uuid,
    pub auth_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUserModel {
    pub id: Uuid,
    pub auth_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&DomainUser> for NewUserModel {
    fn from(user: &DomainUser) -> Self {
        Self {
            id: user.id(),
            auth_id: user.auth_id().to_string(),
            email: user.email().to_string(),
            first_name: user.first_name().map(|s| s.to_string()),
            last_name: user.last_name().map(|s| s.to_string()),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

impl From<UserModel> for DomainUser {
    fn from(model: UserModel) -> Self {
        DomainUser::from_database(
            model.id,
            model.auth_id,
            model.email,
            model.first_name,
            model.last_name,
            model.created_at,
            model.updated_at,
        )
    }
}
