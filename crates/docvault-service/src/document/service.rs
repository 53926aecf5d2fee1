//! Document service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use docvault_auth::acl::{EffectivePermission, PermissionResolver};
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::types::pagination::{PageRequest, PageResponse};
use docvault_database::store::{CategoryStore, DocumentStore};
use docvault_entity::access::{AccessAction, Audited};
use docvault_entity::document::{CreateDocument, Document, MAX_TITLE_LENGTH, UpdateDocument};
use docvault_entity::share::PermissionLevel;

use super::fetch_document;
use crate::access::AccessLogger;
use crate::context::RequestContext;

/// Metadata for a new document. The actor becomes its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    /// Title (1 to 200 characters).
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Opaque reference to the stored file.
    pub file_ref: String,
    /// Category, if any.
    pub category_id: Option<Uuid>,
    /// Whether any user may view the document.
    #[serde(default)]
    pub is_shared: bool,
}

/// Manages documents and their metadata.
#[derive(Debug, Clone)]
pub struct DocumentService {
    documents: Arc<dyn DocumentStore>,
    categories: Arc<dyn CategoryStore>,
    resolver: Arc<PermissionResolver>,
    logger: Arc<AccessLogger>,
    log_views: bool,
}

impl DocumentService {
    /// Creates a new document service.
    ///
    /// When `log_views` is set, every detail read records a `view` entry.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        categories: Arc<dyn CategoryStore>,
        resolver: Arc<PermissionResolver>,
        logger: Arc<AccessLogger>,
        log_views: bool,
    ) -> Self {
        Self {
            documents,
            categories,
            resolver,
            logger,
            log_views,
        }
    }

    /// Creates a document owned by the actor.
    pub async fn upload(&self, ctx: &RequestContext, new: NewDocument) -> AppResult<Document> {
        let title = validate_title(&new.title)?;
        if new.file_ref.trim().is_empty() {
            return Err(AppError::validation("File reference must not be empty"));
        }
        if let Some(category_id) = new.category_id {
            self.require_category(category_id).await?;
        }

        let document = self
            .documents
            .create_document(&CreateDocument {
                title,
                description: new.description,
                file_ref: new.file_ref,
                category_id: new.category_id,
                owner_id: ctx.user_id,
                is_shared: new.is_shared,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            "Document uploaded"
        );

        Ok(document)
    }

    /// The actor's own documents, newest first.
    pub async fn list_owned(
        &self,
        ctx: &RequestContext,
        category_id: Option<Uuid>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        self.documents
            .list_owned_documents(ctx.user_id, category_id, &page)
            .await
    }

    /// A document's metadata and the actor's permission on it. Requires
    /// `View`.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> AppResult<(Document, EffectivePermission)> {
        let document = fetch_document(self.documents.as_ref(), document_id).await?;
        let permission = self
            .resolver
            .require_permission(ctx.user_id, &document, PermissionLevel::View)
            .await?;

        if self.log_views {
            self.logger
                .log(ctx.user_id, document.id, AccessAction::View, "")
                .await?;
        }

        Ok((document, permission))
    }

    /// Applies metadata changes. Requires `Edit`, or `Manage` when the
    /// shared flag changes; records an `edit` entry naming the changed
    /// fields.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        changes: UpdateDocument,
    ) -> AppResult<Audited<Document>> {
        let mut document = fetch_document(self.documents.as_ref(), document_id).await?;
        let permission = self
            .resolver
            .require_permission(ctx.user_id, &document, PermissionLevel::Edit)
            .await?;
        if changes.is_shared.is_some() && !permission.allows(PermissionLevel::Manage) {
            return Err(AppError::permission_denied(
                "Requires manage permission to change sharing",
            ));
        }

        if changes.is_empty() {
            return Err(AppError::validation("No changes supplied"));
        }
        if let Some(title) = &changes.title {
            validate_title(title)?;
        }
        if let Some(Some(category_id)) = changes.category_id {
            self.require_category(category_id).await?;
        }

        let fields = changes.changed_fields();
        changes.apply_to(&mut document);
        document.title = document.title.trim().to_string();

        let entry = AccessLogger::entry(
            ctx.user_id,
            document.id,
            AccessAction::Edit,
            format!("Updated {}", fields.join(", ")),
        );
        let audited = self.documents.update_document(&document, &entry).await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            fields = ?fields,
            "Document updated"
        );

        Ok(audited)
    }

    /// Deletes a document and everything attached to it. Owner only.
    pub async fn delete(&self, ctx: &RequestContext, document_id: Uuid) -> AppResult<()> {
        let document = fetch_document(self.documents.as_ref(), document_id).await?;
        if !document.is_owned_by(ctx.user_id) {
            return Err(AppError::permission_denied(
                "Only the owner can delete this document",
            ));
        }

        if !self.documents.delete_document(document.id).await? {
            return Err(AppError::not_found(format!("Document {document_id} not found")));
        }

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            "Document deleted"
        );

        Ok(())
    }

    async fn require_category(&self, category_id: Uuid) -> AppResult<()> {
        self.categories
            .find_category(category_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Category {category_id} not found")))
    }
}

/// Trim a title and check its length.
fn validate_title(title: &str) -> AppResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::validation("Title must not be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(title.to_string())
}
