//! Annotation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Page used when none is given.
pub const DEFAULT_PAGE: i32 = 1;

/// A note pinned to a point on a rendered page.
///
/// Coordinates are interpreted by the renderer against the page size;
/// they are stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Annotation {
    /// Unique annotation identifier.
    pub id: Uuid,
    /// The annotated document.
    pub document_id: Uuid,
    /// Author.
    pub author_id: Uuid,
    /// Note text.
    pub content: String,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// 1-based page number.
    pub page: i32,
    /// When the annotation was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create an annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnnotation {
    /// Document.
    pub document_id: Uuid,
    /// Author.
    pub author_id: Uuid,
    /// Text.
    pub content: String,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Page number.
    pub page: i32,
}
