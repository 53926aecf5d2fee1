//! Access history repository.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_core::types::pagination::{PageRequest, PageResponse};
use docvault_entity::access::{AccessHistory, CreateAccessHistory};

use super::{db_error, write_error};
use crate::store::AccessHistoryStore;

/// Append-only access history backed by `access_history`.
#[derive(Debug, Clone)]
pub struct AccessHistoryRepository {
    pool: PgPool,
}

impl AccessHistoryRepository {
    /// Create a new access history repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert one access history row on an open connection or transaction.
pub(crate) async fn insert_access(
    conn: &mut PgConnection,
    data: &CreateAccessHistory,
) -> AppResult<AccessHistory> {
    sqlx::query_as::<_, AccessHistory>(
        "INSERT INTO access_history (document_id, user_id, action, details) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(data.document_id)
    .bind(data.user_id)
    .bind(data.action)
    .bind(&data.details)
    .fetch_one(conn)
    .await
    .map_err(|e| write_error("Failed to record access", e))
}

#[async_trait]
impl AccessHistoryStore for AccessHistoryRepository {
    async fn append_access(&self, data: &CreateAccessHistory) -> AppResult<AccessHistory> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;
        insert_access(&mut conn, data).await
    }

    async fn list_access(
        &self,
        document_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AccessHistory>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM access_history WHERE document_id = $1")
                .bind(document_id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count access history"))?;

        let rows = sqlx::query_as::<_, AccessHistory>(
            "SELECT * FROM access_history WHERE document_id = $1 \
             ORDER BY accessed_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(document_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list access history"))?;

        Ok(PageResponse::new(rows, page.page, page.page_size, total as u64))
    }
}
