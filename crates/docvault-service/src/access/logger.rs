//! Access logger.
//!
//! Writes that change a document build their entry with
//! [`AccessLogger::entry`] and hand it to the store, which commits the
//! action and the entry together. Standalone events (views) go through
//! [`AccessLogger::log`].

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_database::store::AccessHistoryStore;
use docvault_entity::access::{AccessAction, AccessHistory, CreateAccessHistory};

/// Appends rows to the access history.
#[derive(Debug, Clone)]
pub struct AccessLogger {
    store: Arc<dyn AccessHistoryStore>,
}

impl AccessLogger {
    /// Creates a new access logger.
    pub fn new(store: Arc<dyn AccessHistoryStore>) -> Self {
        Self { store }
    }

    /// Builds an entry for a write that commits its own audit row.
    pub fn entry(
        user_id: Uuid,
        document_id: Uuid,
        action: AccessAction,
        details: impl Into<String>,
    ) -> CreateAccessHistory {
        CreateAccessHistory {
            document_id,
            user_id,
            action,
            details: details.into(),
        }
    }

    /// Appends one row. Fails only when the store does.
    pub async fn log(
        &self,
        user_id: Uuid,
        document_id: Uuid,
        action: AccessAction,
        details: impl Into<String>,
    ) -> AppResult<AccessHistory> {
        let entry = Self::entry(user_id, document_id, action, details);
        let row = self.store.append_access(&entry).await?;

        info!(
            user_id = %user_id,
            document_id = %document_id,
            action = %action,
            "Access recorded"
        );

        Ok(row)
    }
}
