//! Document repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::types::pagination::{PageRequest, PageResponse};
use docvault_entity::access::{Audited, CreateAccessHistory};
use docvault_entity::document::{CreateDocument, Document};

use super::access::insert_access;
use super::{db_error, write_error};
use crate::store::DocumentStore;

/// Documents backed by the `documents` table.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn create_document(&self, data: &CreateDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents (title, description, file_ref, category_id, owner_id, is_shared) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.file_ref)
        .bind(data.category_id)
        .bind(data.owner_id)
        .bind(data.is_shared)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("Failed to create document", e))
    }

    async fn find_document(&self, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find document"))
    }

    async fn list_owned_documents(
        &self,
        owner_id: Uuid,
        category_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM documents \
             WHERE owner_id = $1 AND ($2::uuid IS NULL OR category_id = $2)",
        )
        .bind(owner_id)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count documents"))?;

        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents \
             WHERE owner_id = $1 AND ($2::uuid IS NULL OR category_id = $2) \
             ORDER BY uploaded_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(owner_id)
        .bind(category_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list documents"))?;

        Ok(PageResponse::new(documents, page.page, page.page_size, total as u64))
    }

    async fn list_shared_documents(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shares WHERE shared_with = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count shared documents"))?;

        let documents = sqlx::query_as::<_, Document>(
            "SELECT d.* FROM documents d \
             JOIN shares s ON s.document_id = d.id \
             WHERE s.shared_with = $1 \
             ORDER BY d.uploaded_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list shared documents"))?;

        Ok(PageResponse::new(documents, page.page, page.page_size, total as u64))
    }

    async fn update_document(
        &self,
        document: &Document,
        audit: &CreateAccessHistory,
    ) -> AppResult<Audited<Document>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let updated = sqlx::query_as::<_, Document>(
            "UPDATE documents SET title = $2, description = $3, category_id = $4, is_shared = $5 \
             WHERE id = $1 RETURNING *",
        )
        .bind(document.id)
        .bind(&document.title)
        .bind(&document.description)
        .bind(document.category_id)
        .bind(document.is_shared)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| write_error("Failed to update document", e))?
        .ok_or_else(|| AppError::not_found(format!("Document {} not found", document.id)))?;

        let access = insert_access(&mut tx, audit).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit document update"))?;

        Ok(Audited::new(updated, access))
    }

    async fn delete_document(&self, id: Uuid) -> AppResult<bool> {
        // shares, access_history, comments, and annotations cascade
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete document"))?;
        Ok(result.rows_affected() > 0)
    }
}
