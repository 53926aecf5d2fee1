//! Threaded comments.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use docvault_auth::acl::PermissionResolver;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_database::store::{CommentStore, DocumentStore, UserStore};
use docvault_entity::access::{AccessAction, Audited};
use docvault_entity::comment::{CommentNode, CreateComment, build_threads};
use docvault_entity::share::PermissionLevel;

use super::view::CommentView;
use crate::access::AccessLogger;
use crate::context::RequestContext;
use crate::document::fetch_document;

/// Longest accepted comment body, in characters.
const MAX_COMMENT_LENGTH: usize = 10_000;

/// Adds, lists, and deletes comments.
#[derive(Debug, Clone)]
pub struct CommentService {
    documents: Arc<dyn DocumentStore>,
    users: Arc<dyn UserStore>,
    comments: Arc<dyn CommentStore>,
    resolver: Arc<PermissionResolver>,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        users: Arc<dyn UserStore>,
        comments: Arc<dyn CommentStore>,
        resolver: Arc<PermissionResolver>,
    ) -> Self {
        Self {
            documents,
            users,
            comments,
            resolver,
        }
    }

    /// Adds a comment. Requires `Comment`.
    ///
    /// A `parent_id` that does not name a comment on the same document is
    /// dropped and the comment becomes top-level.
    pub async fn add_comment(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        content: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<Audited<CommentView>> {
        let document = fetch_document(self.documents.as_ref(), document_id).await?;
        self.resolver
            .require_permission(ctx.user_id, &document, PermissionLevel::Comment)
            .await?;

        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Comment must not be empty"));
        }
        if content.chars().count() > MAX_COMMENT_LENGTH {
            return Err(AppError::validation(format!(
                "Comment must be at most {MAX_COMMENT_LENGTH} characters"
            )));
        }

        let parent_id = match parent_id {
            Some(id) => self.resolve_parent(document.id, id).await?,
            None => None,
        };

        let details = if parent_id.is_some() {
            "Replied to a comment"
        } else {
            "Added comment"
        };
        let entry = AccessLogger::entry(ctx.user_id, document.id, AccessAction::Comment, details);
        let audited = self
            .comments
            .create_comment(
                &CreateComment {
                    document_id: document.id,
                    author_id: ctx.user_id,
                    parent_id,
                    content: content.to_string(),
                },
                &entry,
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            comment_id = %audited.value.id,
            "Comment added"
        );

        let author_name = self.author_name(ctx.user_id).await?;
        Ok(audited.map(|comment| CommentView::new(comment, author_name)))
    }

    /// A document's comments in creation order. Requires `View`.
    pub async fn list_comments(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> AppResult<Vec<CommentView>> {
        let document = fetch_document(self.documents.as_ref(), document_id).await?;
        self.resolver
            .require_permission(ctx.user_id, &document, PermissionLevel::View)
            .await?;

        let comments = self.comments.list_comments(document.id).await?;

        let mut names: HashMap<Uuid, String> = HashMap::new();
        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            let name = match names.get(&comment.author_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self.author_name(comment.author_id).await?;
                    names.insert(comment.author_id, name.clone());
                    name
                }
            };
            views.push(CommentView::new(comment, name));
        }
        Ok(views)
    }

    /// A document's comments as reply trees, nested at most
    /// `MAX_THREAD_DEPTH` levels. Requires `View`.
    pub async fn comment_threads(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> AppResult<Vec<CommentNode>> {
        let document = fetch_document(self.documents.as_ref(), document_id).await?;
        self.resolver
            .require_permission(ctx.user_id, &document, PermissionLevel::View)
            .await?;

        let comments = self.comments.list_comments(document.id).await?;
        Ok(build_threads(comments))
    }

    /// Deletes a comment; its replies become top-level. Allowed for the
    /// author and for users who manage the document.
    pub async fn delete_comment(&self, ctx: &RequestContext, comment_id: Uuid) -> AppResult<()> {
        let comment = self
            .comments
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Comment {comment_id} not found")))?;

        if comment.author_id != ctx.user_id {
            let document = fetch_document(self.documents.as_ref(), comment.document_id).await?;
            self.resolver
                .require_permission(ctx.user_id, &document, PermissionLevel::Manage)
                .await?;
        }

        if !self.comments.delete_comment(comment.id).await? {
            return Err(AppError::not_found(format!("Comment {comment_id} not found")));
        }

        info!(
            user_id = %ctx.user_id,
            document_id = %comment.document_id,
            comment_id = %comment_id,
            "Comment deleted"
        );

        Ok(())
    }

    /// Picks the audit details only; the store re-checks the parent in the
    /// same write that inserts the comment.
    async fn resolve_parent(&self, document_id: Uuid, parent_id: Uuid) -> AppResult<Option<Uuid>> {
        match self.comments.find_comment(parent_id).await? {
            Some(parent) if parent.document_id == document_id => Ok(Some(parent.id)),
            _ => {
                debug!(
                    document_id = %document_id,
                    parent_id = %parent_id,
                    "Unresolved parent comment, posting top-level"
                );
                Ok(None)
            }
        }
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
