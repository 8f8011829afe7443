use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account that owns blog posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new account with a generated id and timestamps.
    pub fn new(email: String, name: Option<String>, password_hash: String) -> Self {
        let now = Utc::now();
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Self {
            id: Uuid::new_v4(),
            email: email.trim().to_lowercase(),
            name,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
