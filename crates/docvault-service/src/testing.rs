//! Shared fixtures for service tests, wired to the in-memory store.

use std::sync::Arc;

use uuid::Uuid;

use docvault_auth::acl::PermissionResolver;
use docvault_core::types::pagination::PageRequest;
use docvault_database::{MemoryStore, Stores};
use docvault_entity::access::AccessHistory;
use docvault_entity::document::Document;
use docvault_entity::share::PermissionLevel;

use crate::access::{AccessLogger, HistoryService};
use crate::category::CategoryService;
use crate::context::RequestContext;
use crate::discussion::{AnnotationService, CommentService};
use crate::document::{DocumentService, NewDocument};
use crate::share::ShareService;
use crate::user::UserService;

pub(crate) struct Harness {
    pub stores: Stores,
    pub logger: Arc<AccessLogger>,
    pub users: UserService,
    pub categories: CategoryService,
    pub documents: DocumentService,
    pub shares: ShareService,
    pub comments: CommentService,
    pub annotations: AnnotationService,
    pub history: HistoryService,
}

impl Harness {
    pub async fn new() -> Self {
        let stores = Stores::memory(MemoryStore::new());
        let resolver = Arc::new(PermissionResolver::new(stores.shares.clone()));
        let logger = Arc::new(AccessLogger::new(stores.access.clone()));

        Self {
            users: UserService::new(stores.users.clone()),
            categories: CategoryService::new(stores.categories.clone()),
            documents: DocumentService::new(
                stores.documents.clone(),
                stores.categories.clone(),
                resolver.clone(),
                logger.clone(),
                true,
            ),
            shares: ShareService::new(
                stores.documents.clone(),
                stores.users.clone(),
                stores.shares.clone(),
                resolver.clone(),
            ),
            comments: CommentService::new(
                stores.documents.clone(),
                stores.users.clone(),
                stores.comments.clone(),
                resolver.clone(),
            ),
            annotations: AnnotationService::new(
                stores.documents.clone(),
                stores.users.clone(),
                stores.annotations.clone(),
                resolver.clone(),
            ),
            history: HistoryService::new(stores.documents.clone(), stores.access.clone(), resolver),
            logger,
            stores,
        }
    }

    /// Register a user and return a context acting as them.
    pub async fn user(&self, username: &str) -> RequestContext {
        let user = self.users.register(None, username, None).await.unwrap();
        RequestContext::new(user.id, user.username)
    }

    pub async fn document(&self, owner: &RequestContext, is_shared: bool) -> Document {
        self.documents
            .upload(
                owner,
                NewDocument {
                    title: "Site survey".to_string(),
                    description: "Phase one".to_string(),
                    file_ref: "documents/survey.pdf".to_string(),
                    category_id: None,
                    is_shared,
                },
            )
            .await
            .unwrap()
    }

    pub async fn share(
        &self,
        actor: &RequestContext,
        document_id: Uuid,
        grantee: &RequestContext,
        level: PermissionLevel,
    ) {
        self.shares
            .share(actor, document_id, grantee.user_id, level.as_str())
            .await
            .unwrap();
    }

    pub async fn access_rows(&self, document_id: Uuid) -> Vec<AccessHistory> {
        self.stores
            .access
            .list_access(document_id, &PageRequest::new(1, 100))
            .await
            .unwrap()
            .items
    }
}
