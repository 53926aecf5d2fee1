//! Render-ready comment and annotation payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docvault_entity::annotation::Annotation;
use docvault_entity::comment::Comment;

/// Timestamp format shown next to comments, e.g. `Mar 04, 2025 14:07`.
pub const DISPLAY_FORMAT: &str = "%b %d, %Y %H:%M";

/// A comment with everything needed to render it without another read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    /// Comment ID.
    pub id: Uuid,
    /// Document the comment belongs to.
    pub document_id: Uuid,
    /// Parent comment, if this is a reply.
    pub parent_id: Option<Uuid>,
    /// Author ID.
    pub author_id: Uuid,
    /// Author display name.
    pub author_name: String,
    /// Comment body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Creation timestamp formatted for display.
    pub created_display: String,
}

impl CommentView {
    /// Builds a view from a stored comment and its author's name.
    pub fn new(comment: Comment, author_name: impl Into<String>) -> Self {
        Self {
            created_display: comment.created_at.format(DISPLAY_FORMAT).to_string(),
            id: comment.id,
            document_id: comment.document_id,
            parent_id: comment.parent_id,
            author_id: comment.author_id,
            author_name: author_name.into(),
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

/// An annotation with its author's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationView {
    /// The stored annotation.
    #[serde(flatten)]
    pub annotation: Annotation,
    /// Author display name.
    pub author_name: String,
}
