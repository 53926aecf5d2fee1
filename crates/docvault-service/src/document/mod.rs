//! Document upload, listing, detail, update, and deletion.

pub mod service;

pub use service::{DocumentService, NewDocument};

use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_database::store::DocumentStore;
use docvault_entity::document::Document;

/// Load a document or fail with `NotFound`.
pub(crate) async fn fetch_document(store: &dyn DocumentStore, id: Uuid) -> AppResult<Document> {
    store
        .find_document(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
}
