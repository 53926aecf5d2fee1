//! Entity store traits and backend dispatch.
//!
//! Services depend only on these traits. [`Stores`] bundles one handle per
//! trait and is built from configuration, choosing PostgreSQL or the
//! in-memory tables.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use docvault_core::config::{DatabaseConfig, StoreProvider};
use docvault_core::result::AppResult;
use docvault_core::types::pagination::{PageRequest, PageResponse};
use docvault_entity::access::{AccessHistory, Audited, CreateAccessHistory};
use docvault_entity::annotation::{Annotation, CreateAnnotation};
use docvault_entity::category::{Category, CreateCategory};
use docvault_entity::comment::{Comment, CreateComment};
use docvault_entity::document::{CreateDocument, Document};
use docvault_entity::share::{Share, ShareGrant, UpsertShare};
use docvault_entity::user::{CreateUser, User};

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::repositories::{
    AccessHistoryRepository, AnnotationRepository, CategoryRepository, CommentRepository,
    DocumentRepository, ShareRepository, UserRepository,
};

/// Users known to DocVault.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by id.
    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by username.
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Register a user. Fails with `Conflict` when the username is taken.
    async fn create_user(&self, data: &CreateUser) -> AppResult<User>;

    /// List all users ordered by username.
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Document categories.
#[async_trait]
pub trait CategoryStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create a category.
    async fn create_category(&self, data: &CreateCategory) -> AppResult<Category>;

    /// Find a category by id.
    async fn find_category(&self, id: Uuid) -> AppResult<Option<Category>>;

    /// List all categories ordered by name.
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    /// Delete a category, clearing it from every document that used it.
    async fn delete_category(&self, id: Uuid) -> AppResult<bool>;
}

/// Documents.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create a document.
    async fn create_document(&self, data: &CreateDocument) -> AppResult<Document>;

    /// Find a document by id.
    async fn find_document(&self, id: Uuid) -> AppResult<Option<Document>>;

    /// Documents owned by `owner_id`, newest first, optionally in one category.
    async fn list_owned_documents(
        &self,
        owner_id: Uuid,
        category_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>>;

    /// Documents shared with `user_id` through a share row, newest first.
    async fn list_shared_documents(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>>;

    /// Persist changed metadata and its audit row together.
    async fn update_document(
        &self,
        document: &Document,
        audit: &CreateAccessHistory,
    ) -> AppResult<Audited<Document>>;

    /// Delete a document with its shares, history, comments, and annotations.
    async fn delete_document(&self, id: Uuid) -> AppResult<bool>;
}

/// Per-user share grants.
#[async_trait]
pub trait ShareStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find the share for `(document_id, user_id)`.
    async fn find_share(&self, document_id: Uuid, user_id: Uuid) -> AppResult<Option<Share>>;

    /// All shares on a document, oldest grant first.
    async fn list_shares(&self, document_id: Uuid) -> AppResult<Vec<Share>>;

    /// Insert or overwrite the share keyed by `(document_id, shared_with)`
    /// and append its audit row, atomically.
    async fn upsert_share(
        &self,
        data: &UpsertShare,
        audit: &CreateAccessHistory,
    ) -> AppResult<Audited<ShareGrant>>;

    /// Delete the share for `(document_id, user_id)` and append its audit
    /// row, atomically. Returns `None` (and writes nothing) when no share
    /// existed.
    async fn delete_share(
        &self,
        document_id: Uuid,
        user_id: Uuid,
        audit: &CreateAccessHistory,
    ) -> AppResult<Option<Audited<Share>>>;
}

/// Append-only access history.
#[async_trait]
pub trait AccessHistoryStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append one record.
    async fn append_access(&self, data: &CreateAccessHistory) -> AppResult<AccessHistory>;

    /// A document's history, newest first.
    async fn list_access(
        &self,
        document_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AccessHistory>>;
}

/// Threaded comments.
#[async_trait]
pub trait CommentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a comment by id.
    async fn find_comment(&self, id: Uuid) -> AppResult<Option<Comment>>;

    /// Create a comment and its audit row, atomically. A `parent_id` that
    /// does not name a comment on the same document is dropped, making the
    /// new comment top-level.
    async fn create_comment(
        &self,
        data: &CreateComment,
        audit: &CreateAccessHistory,
    ) -> AppResult<Audited<Comment>>;

    /// A document's comments in ascending creation order.
    async fn list_comments(&self, document_id: Uuid) -> AppResult<Vec<Comment>>;

    /// Delete a comment; its direct replies become top-level comments.
    async fn delete_comment(&self, id: Uuid) -> AppResult<bool>;
}

/// Point-anchored annotations.
#[async_trait]
pub trait AnnotationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create an annotation and its audit row, atomically.
    async fn create_annotation(
        &self,
        data: &CreateAnnotation,
        audit: &CreateAccessHistory,
    ) -> AppResult<Audited<Annotation>>;

    /// A document's annotations in ascending creation order, optionally
    /// restricted to one page.
    async fn list_annotations(
        &self,
        document_id: Uuid,
        page: Option<i32>,
    ) -> AppResult<Vec<Annotation>>;
}

/// The concrete backend behind a [`Stores`] bundle.
#[derive(Debug, Clone)]
enum Backend {
    Postgres(DatabasePool),
    Memory,
}

/// One handle per store trait, all backed by the same backend.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Users.
    pub users: Arc<dyn UserStore>,
    /// Categories.
    pub categories: Arc<dyn CategoryStore>,
    /// Documents.
    pub documents: Arc<dyn DocumentStore>,
    /// Shares.
    pub shares: Arc<dyn ShareStore>,
    /// Access history.
    pub access: Arc<dyn AccessHistoryStore>,
    /// Comments.
    pub comments: Arc<dyn CommentStore>,
    /// Annotations.
    pub annotations: Arc<dyn AnnotationStore>,
    backend: Backend,
}

impl Stores {
    /// Build the stores selected by configuration.
    ///
    /// For PostgreSQL this connects the pool and, when enabled, applies
    /// pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Postgres => {
                info!("Initializing PostgreSQL entity store");
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    crate::migration::run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            StoreProvider::Memory => {
                info!("Initializing in-memory entity store");
                Ok(Self::memory(MemoryStore::new()))
            }
        }
    }

    /// Stores backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            categories: Arc::new(CategoryRepository::new(pg.clone())),
            documents: Arc::new(DocumentRepository::new(pg.clone())),
            shares: Arc::new(ShareRepository::new(pg.clone())),
            access: Arc::new(AccessHistoryRepository::new(pg.clone())),
            comments: Arc::new(CommentRepository::new(pg.clone())),
            annotations: Arc::new(AnnotationRepository::new(pg)),
            backend: Backend::Postgres(pool),
        }
    }

    /// Stores backed by one shared set of in-memory tables.
    pub fn memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            categories: store.clone(),
            documents: store.clone(),
            shares: store.clone(),
            access: store.clone(),
            comments: store.clone(),
            annotations: store,
            backend: Backend::Memory,
        }
    }

    /// Short backend name for logs and health output.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Check that the backend is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.backend {
            Backend::Postgres(pool) => pool.health_check().await,
            Backend::Memory => Ok(true),
        }
    }

    /// Close backend connections.
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
        }
    }
}
