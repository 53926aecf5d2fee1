//! Audit trail reads.

use std::sync::Arc;

use uuid::Uuid;

use docvault_auth::acl::PermissionResolver;
use docvault_core::result::AppResult;
use docvault_core::types::pagination::{PageRequest, PageResponse};
use docvault_database::store::{AccessHistoryStore, DocumentStore};
use docvault_entity::access::AccessHistory;
use docvault_entity::share::PermissionLevel;

use crate::context::RequestContext;
use crate::document::fetch_document;

/// Lists a document's access history for users who manage it.
#[derive(Debug, Clone)]
pub struct HistoryService {
    documents: Arc<dyn DocumentStore>,
    access: Arc<dyn AccessHistoryStore>,
    resolver: Arc<PermissionResolver>,
}

impl HistoryService {
    /// Creates a new history service.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        access: Arc<dyn AccessHistoryStore>,
        resolver: Arc<PermissionResolver>,
    ) -> Self {
        Self {
            documents,
            access,
            resolver,
        }
    }

    /// The document's audit trail, newest first. Requires `Manage`.
    pub async fn history(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<AccessHistory>> {
        let document = fetch_document(self.documents.as_ref(), document_id).await?;
        self.resolver
            .require_permission(ctx.user_id, &document, PermissionLevel::Manage)
            .await?;

        self.access.list_access(document_id, &page).await
    }
}
