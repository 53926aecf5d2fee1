//! User entity model.
//!
//! Users are owned by the authentication collaborator; DocVault keeps
//! only what it needs to attribute documents, shares, and comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user known to DocVault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier (matches the token subject).
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The name to show next to comments and in audit details.
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Data required to register a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Explicit id, when the auth collaborator already assigned one.
    pub id: Option<Uuid>,
    /// Desired username.
    pub username: String,
    /// Display name (optional).
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(display_name: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            username: "jdoe".to_string(),
            display_name: display_name.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        assert_eq!(user(None).display_name(), "jdoe");
        assert_eq!(user(Some("  ")).display_name(), "jdoe");
        assert_eq!(user(Some("Jane Doe")).display_name(), "Jane Doe");
    }
}
