//! Point-anchored annotations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use docvault_auth::acl::PermissionResolver;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_database::store::{AnnotationStore, DocumentStore, UserStore};
use docvault_entity::access::{AccessAction, Audited};
use docvault_entity::annotation::{CreateAnnotation, DEFAULT_PAGE};
use docvault_entity::share::PermissionLevel;

use super::view::AnnotationView;
use crate::access::AccessLogger;
use crate::context::RequestContext;
use crate::document::fetch_document;

/// Audit detail recorded for every new annotation.
pub const ANNOTATION_DETAILS: &str = "Added annotation";

/// A note anchored at a point on a document page.
///
/// Coordinates are interpreted by the renderer against page dimensions
/// and are not bounds-checked here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnnotation {
    /// Note body.
    pub content: String,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Page number; defaults to the first page.
    pub page: Option<i32>,
}

/// Adds and lists annotations.
#[derive(Debug, Clone)]
pub struct AnnotationService {
    documents: Arc<dyn DocumentStore>,
    users: Arc<dyn UserStore>,
    annotations: Arc<dyn AnnotationStore>,
    resolver: Arc<PermissionResolver>,
}

impl AnnotationService {
    /// Creates a new annotation service.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        users: Arc<dyn UserStore>,
        annotations: Arc<dyn AnnotationStore>,
        resolver: Arc<PermissionResolver>,
    ) -> Self {
        Self {
            documents,
            users,
            annotations,
            resolver,
        }
    }

    /// Adds an annotation. Requires `Comment`.
    pub async fn add_annotation(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        new: NewAnnotation,
    ) -> AppResult<Audited<AnnotationView>> {
        let document = fetch_document(self.documents.as_ref(), document_id).await?;
        self.resolver
            .require_permission(ctx.user_id, &document, PermissionLevel::Comment)
            .await?;

        if !new.x.is_finite() || !new.y.is_finite() {
            return Err(AppError::validation("Coordinates must be finite numbers"));
        }
        let page = new.page.unwrap_or(DEFAULT_PAGE);
        if page < 1 {
            return Err(AppError::validation("Page must be at least 1"));
        }
        let content = new.content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Annotation must not be empty"));
        }

        let entry = AccessLogger::entry(
            ctx.user_id,
            document.id,
            AccessAction::Comment,
            ANNOTATION_DETAILS,
        );
        let audited = self
            .annotations
            .create_annotation(
                &CreateAnnotation {
                    document_id: document.id,
                    author_id: ctx.user_id,
                    content: content.to_string(),
                    x: new.x,
                    y: new.y,
                    page,
                },
                &entry,
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            annotation_id = %audited.value.id,
            page = page,
            "Annotation added"
        );

        let author_name = self.author_name(ctx.user_id).await?;
        Ok(audited.map(|annotation| AnnotationView {
            annotation,
            author_name,
        }))
    }

    /// A document's annotations in creation order, optionally for one
    /// page. Requires `View`.
    pub async fn list_annotations(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        page: Option<i32>,
    ) -> AppResult<Vec<AnnotationView>> {
        let document = fetch_document(self.documents.as_ref(), document_id).await?;
        self.resolver
            .require_permission(ctx.user_id, &document, PermissionLevel::View)
            .await?;

        let annotations = self.annotations.list_annotations(document.id, page).await?;
        let mut views = Vec::with_capacity(annotations.len());
        for annotation in annotations {
            let author_name = self.author_name(annotation.author_id).await?;
            views.push(AnnotationView {
                annotation,
                author_name,
            });
        }
        Ok(views)
    }

    async fn author_name(&self, user_id: Uuid) -> AppResult<String> {
        Ok(self
            .users
            .find_user(user_id)
            .await?
            .map(|user| user.display_name().to_string())
            .unwrap_or_else(|| user_id.to_string()))
    }
}
