//! Effective permission resolver for documents.
//!
//! Resolution order:
//! 1. Owner: the document owner always holds `Manage`, whatever share rows say.
//! 2. Share: the level on the unique share row for `(document, user)`.
//! 3. Shared flag: a document marked shared is viewable by any user.
//! 4. Denied.
//!
//! Nothing is cached; every call reads the current share row.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_database::store::ShareStore;
use docvault_entity::document::Document;
use docvault_entity::share::PermissionLevel;

/// Result of resolving a user's permission on one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePermission {
    /// The highest level the user holds, or `None` for no access.
    pub level: Option<PermissionLevel>,
    /// Where the level came from.
    pub source: PermissionSource,
}

impl EffectivePermission {
    /// Whether the resolved level is at least `required`.
    pub fn allows(&self, required: PermissionLevel) -> bool {
        self.level.is_some_and(|level| level.has_at_least(required))
    }

    fn denied() -> Self {
        Self {
            level: None,
            source: PermissionSource::Denied,
        }
    }
}

/// Where an effective permission was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionSource {
    /// The user owns the document.
    Owner,
    /// A share row grants the level.
    Share,
    /// The document's shared flag grants view access.
    SharedFlag,
    /// No applicable grant.
    Denied,
}

/// Resolves effective permissions from ownership, share rows, and the
/// shared flag.
#[derive(Debug, Clone)]
pub struct PermissionResolver {
    shares: Arc<dyn ShareStore>,
}

impl PermissionResolver {
    /// Creates a resolver reading share rows from `shares`.
    pub fn new(shares: Arc<dyn ShareStore>) -> Self {
        Self { shares }
    }

    /// Resolves the effective permission of `user_id` on `document`.
    pub async fn resolve(&self, user_id: Uuid, document: &Document) -> AppResult<EffectivePermission> {
        if document.is_owned_by(user_id) {
            return Ok(EffectivePermission {
                level: Some(PermissionLevel::Manage),
                source: PermissionSource::Owner,
            });
        }

        if let Some(share) = self.shares.find_share(document.id, user_id).await? {
            debug!(
                user_id = %user_id,
                document_id = %document.id,
                level = %share.permission,
                "Permission resolved from share"
            );
            return Ok(EffectivePermission {
                level: Some(share.permission),
                source: PermissionSource::Share,
            });
        }

        if document.is_shared {
            return Ok(EffectivePermission {
                level: Some(PermissionLevel::View),
                source: PermissionSource::SharedFlag,
            });
        }

        Ok(EffectivePermission::denied())
    }

    /// Whether `user_id` holds at least `required` on `document`.
    pub async fn has_permission(
        &self,
        user_id: Uuid,
        document: &Document,
        required: PermissionLevel,
    ) -> AppResult<bool> {
        Ok(self.resolve(user_id, document).await?.allows(required))
    }

    /// Fails with `PermissionDenied` unless `user_id` holds at least
    /// `required` on `document`.
    pub async fn require_permission(
        &self,
        user_id: Uuid,
        document: &Document,
        required: PermissionLevel,
    ) -> AppResult<EffectivePermission> {
        let permission = self.resolve(user_id, document).await?;
        if !permission.allows(required) {
            debug!(
                user_id = %user_id,
                document_id = %document.id,
                required = %required,
                "Permission denied"
            );
            return Err(AppError::permission_denied(format!(
                "Requires {required} permission on this document"
            )));
        }
        Ok(permission)
    }
}
