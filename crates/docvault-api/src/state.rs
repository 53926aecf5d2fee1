//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use docvault_auth::acl::PermissionResolver;
use docvault_auth::jwt::JwtDecoder;
use docvault_core::config::AppConfig;
use docvault_database::Stores;
use docvault_service::{
    AccessLogger, AnnotationService, CategoryService, CommentService, DocumentService,
    HistoryService, ShareService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Entity stores (PostgreSQL or in-memory)
    pub stores: Stores,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token decoder
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Effective permission resolver
    pub permission_resolver: Arc<PermissionResolver>,

    // ── Services ─────────────────────────────────────────────
    /// User lookups
    pub user_service: Arc<UserService>,
    /// Categories
    pub category_service: Arc<CategoryService>,
    /// Documents
    pub document_service: Arc<DocumentService>,
    /// Sharing manager
    pub share_service: Arc<ShareService>,
    /// Comments
    pub comment_service: Arc<CommentService>,
    /// Annotations
    pub annotation_service: Arc<AnnotationService>,
    /// Audit trail reads
    pub history_service: Arc<HistoryService>,
}

impl AppState {
    /// Wires every service on top of `stores`.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let permission_resolver = Arc::new(PermissionResolver::new(stores.shares.clone()));
        let access_logger = Arc::new(AccessLogger::new(stores.access.clone()));

        let user_service = Arc::new(UserService::new(stores.users.clone()));
        let category_service = Arc::new(CategoryService::new(stores.categories.clone()));
        let document_service = Arc::new(DocumentService::new(
            stores.documents.clone(),
            stores.categories.clone(),
            Arc::clone(&permission_resolver),
            Arc::clone(&access_logger),
            config.audit.log_views,
        ));
        let share_service = Arc::new(ShareService::new(
            stores.documents.clone(),
            stores.users.clone(),
            stores.shares.clone(),
            Arc::clone(&permission_resolver),
        ));
        let comment_service = Arc::new(CommentService::new(
            stores.documents.clone(),
            stores.users.clone(),
            stores.comments.clone(),
            Arc::clone(&permission_resolver),
        ));
        let annotation_service = Arc::new(AnnotationService::new(
            stores.documents.clone(),
            stores.users.clone(),
            stores.annotations.clone(),
            Arc::clone(&permission_resolver),
        ));
        let history_service = Arc::new(HistoryService::new(
            stores.documents.clone(),
            stores.access.clone(),
            Arc::clone(&permission_resolver),
        ));

        Self {
            config: Arc::new(config),
            stores,
            jwt_decoder,
            permission_resolver,
            user_service,
            category_service,
            document_service,
            share_service,
            comment_service,
            annotation_service,
            history_service,
        }
    }
}
