//! Annotation repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_entity::access::{Audited, CreateAccessHistory};
use docvault_entity::annotation::{Annotation, CreateAnnotation};

use super::access::insert_access;
use super::{db_error, write_error};
use crate::store::AnnotationStore;

/// Annotations backed by the `annotations` table.
#[derive(Debug, Clone)]
pub struct AnnotationRepository {
    pool: PgPool,
}

impl AnnotationRepository {
    /// Create a new annotation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnotationStore for AnnotationRepository {
    async fn create_annotation(
        &self,
        data: &CreateAnnotation,
        audit: &CreateAccessHistory,
    ) -> AppResult<Audited<Annotation>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let annotation = sqlx::query_as::<_, Annotation>(
            "INSERT INTO annotations (document_id, author_id, content, x, y, page, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, clock_timestamp()) RETURNING *",
        )
        .bind(data.document_id)
        .bind(data.author_id)
        .bind(&data.content)
        .bind(data.x)
        .bind(data.y)
        .bind(data.page)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error("Failed to create annotation", e))?;

        let access = insert_access(&mut tx, audit).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit annotation"))?;

        Ok(Audited::new(annotation, access))
    }

    async fn list_annotations(
        &self,
        document_id: Uuid,
        page: Option<i32>,
    ) -> AppResult<Vec<Annotation>> {
        sqlx::query_as::<_, Annotation>(
            "SELECT * FROM annotations \
             WHERE document_id = $1 AND ($2::int IS NULL OR page = $2) \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(document_id)
        .bind(page)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list annotations"))
    }
}
