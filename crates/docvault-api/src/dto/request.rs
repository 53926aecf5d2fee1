//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use docvault_entity::document::UpdateDocument;
use docvault_service::discussion::NewAnnotation;
use docvault_service::document::NewDocument;

use super::numeric;

/// Create category request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Category name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

/// Upload document request. The file itself lives elsewhere; `file_ref`
/// points at it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadDocumentRequest {
    /// Title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Stored file reference.
    #[validate(length(min = 1, max = 1024))]
    pub file_ref: String,
    /// Category.
    pub category_id: Option<Uuid>,
    /// Visible (read-only) to every authenticated user.
    #[serde(default)]
    pub is_shared: bool,
}

impl From<UploadDocumentRequest> for NewDocument {
    fn from(req: UploadDocumentRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            file_ref: req.file_ref,
            category_id: req.category_id,
            is_shared: req.is_shared,
        }
    }
}

/// Update document metadata request. Absent fields are left unchanged;
/// `"category_id": null` clears the category.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDocumentRequest {
    /// New title.
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category, or null to clear.
    #[serde(default, deserialize_with = "numeric::double_option")]
    pub category_id: Option<Option<Uuid>>,
    /// New shared flag.
    pub is_shared: Option<bool>,
}

impl From<UpdateDocumentRequest> for UpdateDocument {
    fn from(req: UpdateDocumentRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            category_id: req.category_id,
            is_shared: req.is_shared,
        }
    }
}

/// Share a document with one user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShareRequest {
    /// Grantee.
    pub user_id: Uuid,
    /// One of VIEW, COMMENT, EDIT, MANAGE.
    #[validate(length(min = 1))]
    pub permission: String,
}

/// Add a comment or reply.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCommentRequest {
    /// Comment text.
    #[validate(length(min = 1))]
    pub content: String,
    /// Comment being replied to.
    pub parent_id: Option<Uuid>,
}

/// Add an annotation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddAnnotationRequest {
    /// Annotation text.
    #[validate(length(min = 1))]
    pub content: String,
    /// Horizontal position.
    #[serde(deserialize_with = "numeric::f64_from_any")]
    pub x: f64,
    /// Vertical position.
    #[serde(deserialize_with = "numeric::f64_from_any")]
    pub y: f64,
    /// Page number (defaults to 1).
    #[serde(default, deserialize_with = "numeric::opt_i32_from_any")]
    pub page: Option<i32>,
}

impl From<AddAnnotationRequest> for NewAnnotation {
    fn from(req: AddAnnotationRequest) -> Self {
        Self {
            content: req.content,
            x: req.x,
            y: req.y,
            page: req.page,
        }
    }
}

/// `?category=` filter on the owned-documents listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentFilter {
    /// Restrict to one category.
    pub category: Option<Uuid>,
}

/// `?threaded=` switch on the comments listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentQuery {
    /// Return reply trees instead of a flat list.
    #[serde(default)]
    pub threaded: bool,
}

/// `?page=` filter on the annotations listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnotationQuery {
    /// Restrict to one page.
    pub page: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let absent: UpdateDocumentRequest = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert_eq!(absent.category_id, None);

        let cleared: UpdateDocumentRequest =
            serde_json::from_str(r#"{"category_id": null}"#).unwrap();
        assert_eq!(cleared.category_id, Some(None));

        let changes = UpdateDocument::from(cleared);
        assert_eq!(changes.changed_fields(), vec!["category"]);
    }

    #[test]
    fn test_upload_rejects_empty_title() {
        let req: UploadDocumentRequest =
            serde_json::from_str(r#"{"title": "", "file_ref": "files/a.pdf"}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
