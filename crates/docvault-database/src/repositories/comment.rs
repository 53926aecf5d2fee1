//! Comment repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_entity::access::{Audited, CreateAccessHistory};
use docvault_entity::comment::{Comment, CreateComment};

use super::access::insert_access;
use super::{db_error, write_error};
use crate::store::CommentStore;

/// Comments backed by the `comments` table.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    async fn find_comment(&self, id: Uuid) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find comment"))
    }

    async fn create_comment(
        &self,
        data: &CreateComment,
        audit: &CreateAccessHistory,
    ) -> AppResult<Audited<Comment>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // The parent is looked up and key-share locked in the insert itself;
        // a parent that is gone or on another document yields a top-level
        // comment. clock_timestamp keeps comments created in one
        // transaction ordered.
        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (document_id, author_id, parent_id, content, created_at) \
             SELECT $1, $2, parent.id, $4, clock_timestamp() \
             FROM (SELECT 1) AS one \
             LEFT JOIN (SELECT id FROM comments WHERE id = $3 AND document_id = $1 FOR KEY SHARE) \
             AS parent ON TRUE \
             RETURNING *",
        )
        .bind(data.document_id)
        .bind(data.author_id)
        .bind(data.parent_id)
        .bind(&data.content)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error("Failed to create comment", e))?;

        let access = insert_access(&mut tx, audit).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit comment"))?;

        Ok(Audited::new(comment, access))
    }

    async fn list_comments(&self, document_id: Uuid) -> AppResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE document_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list comments"))
    }

    async fn delete_comment(&self, id: Uuid) -> AppResult<bool> {
        // replies keep their rows; parent_id is ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete comment"))?;
        Ok(result.rows_affected() > 0)
    }
}
