//! Table storage for [`MemoryStore`].
//!
//! Every table lives behind one `RwLock`, so a write and its access
//! history row are applied under a single guard. Foreign keys, the unique
//! share key, and the delete cascades of the SQL schema are enforced here
//! by hand. Rows are kept in insertion order, which is also creation order.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::types::pagination::{PageRequest, PageResponse};
use docvault_entity::access::{AccessHistory, Audited, CreateAccessHistory};
use docvault_entity::annotation::{Annotation, CreateAnnotation};
use docvault_entity::category::{Category, CreateCategory};
use docvault_entity::comment::{Comment, CreateComment};
use docvault_entity::document::{CreateDocument, Document};
use docvault_entity::share::{Share, ShareGrant, UpsertShare};
use docvault_entity::user::{CreateUser, User};

use crate::store::{
    AccessHistoryStore, AnnotationStore, CategoryStore, CommentStore, DocumentStore, ShareStore,
    UserStore,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    documents: Vec<Document>,
    shares: Vec<Share>,
    access: Vec<AccessHistory>,
    comments: Vec<Comment>,
    annotations: Vec<Annotation>,
}

impl Tables {
    fn require_user(&self, id: Uuid) -> AppResult<()> {
        if self.users.iter().any(|u| u.id == id) {
            Ok(())
        } else {
            Err(AppError::not_found(format!("User {id} not found")))
        }
    }

    fn require_document(&self, id: Uuid) -> AppResult<()> {
        if self.documents.iter().any(|d| d.id == id) {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Document {id} not found")))
        }
    }

    fn require_category(&self, id: Uuid) -> AppResult<()> {
        if self.categories.iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Category {id} not found")))
        }
    }

    fn check_access(&self, data: &CreateAccessHistory) -> AppResult<()> {
        self.require_document(data.document_id)?;
        self.require_user(data.user_id)
    }

    /// Append an access row. Callers run [`Tables::check_access`] first so
    /// that nothing is written when the entry would be rejected.
    fn push_access(&mut self, data: &CreateAccessHistory) -> AccessHistory {
        let row = AccessHistory {
            id: Uuid::new_v4(),
            document_id: data.document_id,
            user_id: data.user_id,
            action: data.action,
            details: data.details.clone(),
            accessed_at: Utc::now(),
        };
        self.access.push(row.clone());
        row
    }
}

/// Entity store holding every table in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        let id = data.id.unwrap_or_else(Uuid::new_v4);
        if tables
            .users
            .iter()
            .any(|u| u.username == data.username || u.id == id)
        {
            return Err(AppError::conflict(format!(
                "User '{}': already exists",
                data.username
            )));
        }

        let user = User {
            id,
            username: data.username.clone(),
            display_name: data.display_name.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users = tables.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn create_category(&self, data: &CreateCategory) -> AppResult<Category> {
        let category = Category {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            created_at: Utc::now(),
        };
        self.tables.write().await.categories.push(category.clone());
        Ok(category)
    }

    async fn find_category(&self, id: Uuid) -> AppResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut categories = tables.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn delete_category(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        if tables.categories.len() == before {
            return Ok(false);
        }

        for document in tables
            .documents
            .iter_mut()
            .filter(|d| d.category_id == Some(id))
        {
            document.category_id = None;
        }
        Ok(true)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(&self, data: &CreateDocument) -> AppResult<Document> {
        let mut tables = self.tables.write().await;
        tables.require_user(data.owner_id)?;
        if let Some(category_id) = data.category_id {
            tables.require_category(category_id)?;
        }

        let document = Document {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            description: data.description.clone(),
            file_ref: data.file_ref.clone(),
            uploaded_at: Utc::now(),
            category_id: data.category_id,
            owner_id: data.owner_id,
            is_shared: data.is_shared,
        };
        tables.documents.push(document.clone());
        Ok(document)
    }

    async fn find_document(&self, id: Uuid) -> AppResult<Option<Document>> {
        let tables = self.tables.read().await;
        Ok(tables.documents.iter().find(|d| d.id == id).cloned())
    }

    async fn list_owned_documents(
        &self,
        owner_id: Uuid,
        category_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        let tables = self.tables.read().await;
        let documents = tables
            .documents
            .iter()
            .rev()
            .filter(|d| d.owner_id == owner_id)
            .filter(|d| category_id.is_none() || d.category_id == category_id)
            .cloned()
            .collect();
        Ok(page.paginate(documents))
    }

    async fn list_shared_documents(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        let tables = self.tables.read().await;
        let documents = tables
            .documents
            .iter()
            .rev()
            .filter(|d| {
                tables
                    .shares
                    .iter()
                    .any(|s| s.document_id == d.id && s.shared_with == user_id)
            })
            .cloned()
            .collect();
        Ok(page.paginate(documents))
    }

    async fn update_document(
        &self,
        document: &Document,
        audit: &CreateAccessHistory,
    ) -> AppResult<Audited<Document>> {
        let mut tables = self.tables.write().await;
        if let Some(category_id) = document.category_id {
            tables.require_category(category_id)?;
        }
        tables.check_access(audit)?;

        let stored = tables
            .documents
            .iter_mut()
            .find(|d| d.id == document.id)
            .ok_or_else(|| AppError::not_found(format!("Document {} not found", document.id)))?;
        stored.title = document.title.clone();
        stored.description = document.description.clone();
        stored.category_id = document.category_id;
        stored.is_shared = document.is_shared;
        let updated = stored.clone();

        let access = tables.push_access(audit);
        Ok(Audited::new(updated, access))
    }

    async fn delete_document(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.documents.len();
        tables.documents.retain(|d| d.id != id);
        if tables.documents.len() == before {
            return Ok(false);
        }

        tables.shares.retain(|s| s.document_id != id);
        tables.access.retain(|a| a.document_id != id);
        tables.comments.retain(|c| c.document_id != id);
        tables.annotations.retain(|a| a.document_id != id);
        debug!(document_id = %id, "Removed document and dependent rows from memory store");
        Ok(true)
    }
}

#[async_trait]
impl ShareStore for MemoryStore {
    async fn find_share(&self, document_id: Uuid, user_id: Uuid) -> AppResult<Option<Share>> {
        let tables = self.tables.read().await;
        Ok(tables
            .shares
            .iter()
            .find(|s| s.document_id == document_id && s.shared_with == user_id)
            .cloned())
    }

    async fn list_shares(&self, document_id: Uuid) -> AppResult<Vec<Share>> {
        let tables = self.tables.read().await;
        let mut shares: Vec<Share> = tables
            .shares
            .iter()
            .filter(|s| s.document_id == document_id)
            .cloned()
            .collect();
        shares.sort_by_key(|s| s.shared_at);
        Ok(shares)
    }

    async fn upsert_share(
        &self,
        data: &UpsertShare,
        audit: &CreateAccessHistory,
    ) -> AppResult<Audited<ShareGrant>> {
        let mut tables = self.tables.write().await;
        tables.require_document(data.document_id)?;
        tables.require_user(data.shared_with)?;
        tables.require_user(data.shared_by)?;
        tables.check_access(audit)?;

        let now = Utc::now();
        let existing = tables
            .shares
            .iter_mut()
            .find(|s| s.document_id == data.document_id && s.shared_with == data.shared_with);

        let grant = match existing {
            Some(share) => {
                share.permission = data.permission;
                share.shared_by = Some(data.shared_by);
                share.shared_at = now;
                ShareGrant {
                    share: share.clone(),
                    created: false,
                }
            }
            None => {
                let share = Share {
                    id: Uuid::new_v4(),
                    document_id: data.document_id,
                    shared_with: data.shared_with,
                    permission: data.permission,
                    shared_by: Some(data.shared_by),
                    shared_at: now,
                };
                tables.shares.push(share.clone());
                ShareGrant {
                    share,
                    created: true,
                }
            }
        };

        let access = tables.push_access(audit);
        Ok(Audited::new(grant, access))
    }

    async fn delete_share(
        &self,
        document_id: Uuid,
        user_id: Uuid,
        audit: &CreateAccessHistory,
    ) -> AppResult<Option<Audited<Share>>> {
        let mut tables = self.tables.write().await;
        let Some(position) = tables
            .shares
            .iter()
            .position(|s| s.document_id == document_id && s.shared_with == user_id)
        else {
            return Ok(None);
        };
        tables.check_access(audit)?;

        let share = tables.shares.remove(position);
        let access = tables.push_access(audit);
        Ok(Some(Audited::new(share, access)))
    }
}

#[async_trait]
impl AccessHistoryStore for MemoryStore {
    async fn append_access(&self, data: &CreateAccessHistory) -> AppResult<AccessHistory> {
        let mut tables = self.tables.write().await;
        tables.check_access(data)?;
        Ok(tables.push_access(data))
    }

    async fn list_access(
        &self,
        document_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AccessHistory>> {
        let tables = self.tables.read().await;
        let rows = tables
            .access
            .iter()
            .rev()
            .filter(|a| a.document_id == document_id)
            .cloned()
            .collect();
        Ok(page.paginate(rows))
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn find_comment(&self, id: Uuid) -> AppResult<Option<Comment>> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn create_comment(
        &self,
        data: &CreateComment,
        audit: &CreateAccessHistory,
    ) -> AppResult<Audited<Comment>> {
        let mut tables = self.tables.write().await;
        tables.require_document(data.document_id)?;
        tables.require_user(data.author_id)?;
        tables.check_access(audit)?;
        let parent_id = data.parent_id.filter(|&parent_id| {
            tables
                .comments
                .iter()
                .any(|c| c.id == parent_id && c.document_id == data.document_id)
        });

        let comment = Comment {
            id: Uuid::new_v4(),
            document_id: data.document_id,
            author_id: data.author_id,
            parent_id,
            content: data.content.clone(),
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());

        let access = tables.push_access(audit);
        Ok(Audited::new(comment, access))
    }

    async fn list_comments(&self, document_id: Uuid) -> AppResult<Vec<Comment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.document_id == document_id)
            .cloned()
            .collect())
    }

    async fn delete_comment(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        if tables.comments.len() == before {
            return Ok(false);
        }

        for reply in tables
            .comments
            .iter_mut()
            .filter(|c| c.parent_id == Some(id))
        {
            reply.parent_id = None;
        }
        Ok(true)
    }
}

#[async_trait]
impl AnnotationStore for MemoryStore {
    async fn create_annotation(
        &self,
        data: &CreateAnnotation,
        audit: &CreateAccessHistory,
    ) -> AppResult<Audited<Annotation>> {
        let mut tables = self.tables.write().await;
        tables.require_document(data.document_id)?;
        tables.require_user(data.author_id)?;
        if data.page < 1 {
            return Err(AppError::validation("Annotation page must be at least 1"));
        }
        tables.check_access(audit)?;

        let annotation = Annotation {
            id: Uuid::new_v4(),
            document_id: data.document_id,
            author_id: data.author_id,
            content: data.content.clone(),
            x: data.x,
            y: data.y,
            page: data.page,
            created_at: Utc::now(),
        };
        tables.annotations.push(annotation.clone());

        let access = tables.push_access(audit);
        Ok(Audited::new(annotation, access))
    }

    async fn list_annotations(
        &self,
        document_id: Uuid,
        page: Option<i32>,
    ) -> AppResult<Vec<Annotation>> {
        let tables = self.tables.read().await;
        Ok(tables
            .annotations
            .iter()
            .filter(|a| a.document_id == document_id)
            .filter(|a| page.is_none_or(|p| a.page == p))
            .cloned()
            .collect())
    }
}
