//! Access history entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::action::AccessAction;

/// An immutable audit record of one action on a document.
///
/// Rows are only ever inserted; they disappear solely through the
/// document's cascade delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AccessHistory {
    /// Unique record identifier.
    pub id: Uuid,
    /// The document acted on.
    pub document_id: Uuid,
    /// The acting user.
    pub user_id: Uuid,
    /// What was done.
    pub action: AccessAction,
    /// Human-readable detail (may be empty).
    pub details: String,
    /// When the action happened.
    pub accessed_at: DateTime<Utc>,
}

/// Data required to append an access history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAccessHistory {
    /// Document.
    pub document_id: Uuid,
    /// Acting user.
    pub user_id: Uuid,
    /// Action kind.
    pub action: AccessAction,
    /// Detail text.
    pub details: String,
}

/// The result of a write together with the access history row committed
/// in the same transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audited<T> {
    /// The written record.
    pub value: T,
    /// The audit row proving the write was logged.
    pub access: AccessHistory,
}

impl<T> Audited<T> {
    /// Pair a written record with its audit row.
    pub fn new(value: T, access: AccessHistory) -> Self {
        Self { value, access }
    }

    /// Transform the written record, keeping the audit row.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Audited<U> {
        Audited {
            value: f(self.value),
            access: self.access,
        }
    }
}
