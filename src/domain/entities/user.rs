use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local profile linked to an external auth id. Created lazily on first
/// upload when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: Uuid,
    auth_id: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(auth_id: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            auth_id,
            email,
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        auth_id: String,
        email: String,
        first_name: Option<String>,
        last_name: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            auth_id,
            email,
            first_name,
            last_name,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn auth_id(&self) -> &str {
        &self.auth_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("ext_12345".to_string(), "unknown@example.com".to_string());
        assert_eq!(user.auth_id(), "ext_12345");
        assert_eq!(user.email(), "unknown@example.com");
        assert!(user.first_name().is_none());
    }
}
