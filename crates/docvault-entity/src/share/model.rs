//! Share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::level::PermissionLevel;

/// A per-user grant on a document.
///
/// At most one share exists per `(document_id, shared_with)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Share {
    /// Unique share identifier.
    pub id: Uuid,
    /// The shared document.
    pub document_id: Uuid,
    /// The grantee.
    pub shared_with: Uuid,
    /// Granted level.
    pub permission: PermissionLevel,
    /// User who last granted this share; `None` once that user is deleted.
    pub shared_by: Option<Uuid>,
    /// When the grant was last written.
    pub shared_at: DateTime<Utc>,
}

/// Data for creating or overwriting the share keyed by `(document_id, shared_with)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertShare {
    /// Document being shared.
    pub document_id: Uuid,
    /// Grantee.
    pub shared_with: Uuid,
    /// Level to grant.
    pub permission: PermissionLevel,
    /// Granting user.
    pub shared_by: Uuid,
}

/// Outcome of an upsert: the stored share and whether it was newly created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareGrant {
    /// The share as stored.
    #[serde(flatten)]
    pub share: Share,
    /// `true` when no share existed for the pair before.
    pub created: bool,
}
