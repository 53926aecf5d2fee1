//! User service.
//!
//! Identities are issued elsewhere; this service only mirrors the users
//! DocVault needs to know about.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_database::store::UserStore;
use docvault_entity::user::{CreateUser, User};

/// Longest accepted username.
const MAX_USERNAME_LENGTH: usize = 150;

/// Registers and looks up users.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Registers a user, optionally with a pre-assigned id.
    pub async fn register(
        &self,
        id: Option<Uuid>,
        username: &str,
        display_name: Option<&str>,
    ) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() || username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(AppError::validation(format!(
                "Username must be 1 to {MAX_USERNAME_LENGTH} characters"
            )));
        }
        if username.chars().any(char::is_whitespace) {
            return Err(AppError::validation("Username must not contain whitespace"));
        }

        let user = self
            .users
            .create_user(&CreateUser {
                id,
                username: username.to_string(),
                display_name: display_name
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string),
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Finds a user by id, failing with `NotFound`.
    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Finds a user by username, failing with `NotFound`.
    pub async fn get_by_username(&self, username: &str) -> AppResult<User> {
        self.users
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }

    /// All users, ordered by username.
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.users.list_users().await
    }
}

#[cfg(test)]
mod tests {
    use docvault_core::error::ErrorKind;

    use super::*;
    use crate::testing::Harness;

    #[tokio::test]
    async fn test_register_validates_and_rejects_duplicates() {
        let h = Harness::new().await;

        let err = h.users.register(None, "two words", None).await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));

        let id = Uuid::new_v4();
        let user = h
            .users
            .register(Some(id), "carol", Some("  "))
            .await
            .unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.display_name, None);

        let err = h.users.register(None, "carol", None).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));

        assert_eq!(h.users.get_by_username("carol").await.unwrap().id, id);
    }
}
