//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A comment on a document, optionally replying to another comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// The commented document.
    pub document_id: Uuid,
    /// Author.
    pub author_id: Uuid,
    /// Parent comment for replies; `None` for top-level comments.
    pub parent_id: Option<Uuid>,
    /// Comment text.
    pub content: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

/// Data required to post a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    /// Document.
    pub document_id: Uuid,
    /// Author.
    pub author_id: Uuid,
    /// Resolved parent comment.
    pub parent_id: Option<Uuid>,
    /// Text.
    pub content: String,
}
