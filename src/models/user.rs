use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for users
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered account that can own and follow feeds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: UserId,
    /// Display name, unique across all users
    pub name: String,
    /// When this user registered
    pub created_at: DateTime<Utc>,
    /// When this user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the given name
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UserId(Uuid::new_v4().to_string()),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
