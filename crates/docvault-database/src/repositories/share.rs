//! Share repository.
//!
//! One row per `(document_id, shared_with)`; re-sharing overwrites the
//! existing row through `ON CONFLICT`, so concurrent grants can never
//! produce a duplicate.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_entity::access::{Audited, CreateAccessHistory};
use docvault_entity::share::{Share, ShareGrant, UpsertShare};

use super::access::insert_access;
use super::{db_error, write_error};
use crate::store::ShareStore;

/// A share row plus whether the upsert inserted it.
#[derive(Debug, FromRow)]
struct UpsertedShare {
    #[sqlx(flatten)]
    share: Share,
    inserted: bool,
}

/// Shares backed by the `shares` table.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareStore for ShareRepository {
    async fn find_share(&self, document_id: Uuid, user_id: Uuid) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE document_id = $1 AND shared_with = $2",
        )
        .bind(document_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find share"))
    }

    async fn list_shares(&self, document_id: Uuid) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE document_id = $1 ORDER BY shared_at, id",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list shares"))
    }

    async fn upsert_share(
        &self,
        data: &UpsertShare,
        audit: &CreateAccessHistory,
    ) -> AppResult<Audited<ShareGrant>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // xmax is zero only for a freshly inserted tuple
        let row = sqlx::query_as::<_, UpsertedShare>(
            "INSERT INTO shares (document_id, shared_with, permission, shared_by) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (document_id, shared_with) DO UPDATE \
             SET permission = EXCLUDED.permission, shared_by = EXCLUDED.shared_by, shared_at = NOW() \
             RETURNING *, (xmax = 0) AS inserted",
        )
        .bind(data.document_id)
        .bind(data.shared_with)
        .bind(data.permission)
        .bind(data.shared_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error("Failed to save share", e))?;

        let access = insert_access(&mut tx, audit).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit share"))?;

        Ok(Audited::new(
            ShareGrant {
                share: row.share,
                created: row.inserted,
            },
            access,
        ))
    }

    async fn delete_share(
        &self,
        document_id: Uuid,
        user_id: Uuid,
        audit: &CreateAccessHistory,
    ) -> AppResult<Option<Audited<Share>>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let removed = sqlx::query_as::<_, Share>(
            "DELETE FROM shares WHERE document_id = $1 AND shared_with = $2 RETURNING *",
        )
        .bind(document_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to delete share"))?;

        let Some(share) = removed else {
            tx.rollback()
                .await
                .map_err(db_error("Failed to roll back share deletion"))?;
            return Ok(None);
        };

        let access = insert_access(&mut tx, audit).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit share deletion"))?;

        Ok(Some(Audited::new(share, access)))
    }
}
