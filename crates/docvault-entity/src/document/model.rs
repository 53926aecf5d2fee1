//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Maximum length of a document title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// An uploaded document owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Document title.
    pub title: String,
    /// Free-text description (may be empty).
    pub description: String,
    /// Opaque reference to the stored file.
    pub file_ref: String,
    /// When the document was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Category, cleared when the category is deleted.
    pub category_id: Option<Uuid>,
    /// Owning user.
    pub owner_id: Uuid,
    /// Document-wide read visibility.
    pub is_shared: bool,
}

impl Document {
    /// Whether `user_id` owns this document.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

/// Data required to create a new document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// File reference.
    pub file_ref: String,
    /// Category (optional).
    pub category_id: Option<Uuid>,
    /// Owner.
    pub owner_id: Uuid,
    /// Shared flag.
    pub is_shared: bool,
}

/// Partial update of document metadata. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDocument {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category; `Some(None)` clears it.
    pub category_id: Option<Option<Uuid>>,
    /// New shared flag.
    pub is_shared: Option<bool>,
}

impl UpdateDocument {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.is_shared.is_none()
    }

    /// Names of the fields this update touches, for audit details.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push("title");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.category_id.is_some() {
            fields.push("category");
        }
        if self.is_shared.is_some() {
            fields.push("shared");
        }
        fields
    }

    /// Apply the update to a document in place.
    pub fn apply_to(&self, document: &mut Document) {
        if let Some(title) = &self.title {
            document.title = title.clone();
        }
        if let Some(description) = &self.description {
            document.description = description.clone();
        }
        if let Some(category_id) = self.category_id {
            document.category_id = category_id;
        }
        if let Some(is_shared) = self.is_shared {
            document.is_shared = is_shared;
        }
    }
}
