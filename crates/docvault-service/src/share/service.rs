//! Sharing manager.
//!
//! Grants, overwrites, and revokes per-user share rows. Every change is
//! committed together with a `share` access history entry.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docvault_auth::acl::PermissionResolver;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::types::pagination::{PageRequest, PageResponse};
use docvault_database::store::{DocumentStore, ShareStore, UserStore};
use docvault_entity::access::{AccessAction, Audited};
use docvault_entity::document::Document;
use docvault_entity::share::{PermissionLevel, Share, ShareGrant, UpsertShare};
use docvault_entity::user::User;

use crate::access::AccessLogger;
use crate::context::RequestContext;
use crate::document::fetch_document;

/// Manages share rows on documents.
#[derive(Debug, Clone)]
pub struct ShareService {
    documents: Arc<dyn DocumentStore>,
    users: Arc<dyn UserStore>,
    shares: Arc<dyn ShareStore>,
    resolver: Arc<PermissionResolver>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        users: Arc<dyn UserStore>,
        shares: Arc<dyn ShareStore>,
        resolver: Arc<PermissionResolver>,
    ) -> Self {
        Self {
            documents,
            users,
            shares,
            resolver,
        }
    }

    /// Grants `grantee_id` the permission named by `level` on a document,
    /// overwriting any existing grant for that user. Requires `Manage`.
    pub async fn share(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        grantee_id: Uuid,
        level: &str,
    ) -> AppResult<Audited<ShareGrant>> {
        let document = self.manageable_document(ctx, document_id).await?;
        let permission: PermissionLevel = level.parse()?;
        let grantee = self.fetch_user(grantee_id).await?;
        if document.is_owned_by(grantee.id) {
            return Err(AppError::validation(
                "The owner already has full access to this document",
            ));
        }

        let entry = AccessLogger::entry(
            ctx.user_id,
            document.id,
            AccessAction::Share,
            format!("Shared with {} ({permission})", grantee.username),
        );
        let audited = self
            .shares
            .upsert_share(
                &UpsertShare {
                    document_id: document.id,
                    shared_with: grantee.id,
                    permission,
                    shared_by: ctx.user_id,
                },
                &entry,
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            grantee_id = %grantee.id,
            permission = %permission,
            created = audited.value.created,
            "Document shared"
        );

        Ok(audited)
    }

    /// Removes `grantee_id`'s share on a document. Requires `Manage`.
    pub async fn revoke(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        grantee_id: Uuid,
    ) -> AppResult<Audited<Share>> {
        let document = self.manageable_document(ctx, document_id).await?;
        let grantee = self.fetch_user(grantee_id).await?;

        let entry = AccessLogger::entry(
            ctx.user_id,
            document.id,
            AccessAction::Share,
            format!("Revoked access for {}", grantee.username),
        );
        let audited = self
            .shares
            .delete_share(document.id, grantee.id, &entry)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "{} has no share on this document",
                    grantee.username
                ))
            })?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            grantee_id = %grantee.id,
            "Share revoked"
        );

        Ok(audited)
    }

    /// Every share on a document. Requires `Manage`.
    pub async fn list_shares(&self, ctx: &RequestContext, document_id: Uuid) -> AppResult<Vec<Share>> {
        let document = self.manageable_document(ctx, document_id).await?;
        self.shares.list_shares(document.id).await
    }

    /// Documents shared with the actor through a share row, newest first.
    pub async fn shared_with_me(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        self.documents.list_shared_documents(ctx.user_id, &page).await
    }

    async fn manageable_document(&self, ctx: &RequestContext, document_id: Uuid) -> AppResult<Document> {
        let document = fetch_document(self.documents.as_ref(), document_id).await?;
        self.resolver
            .require_permission(ctx.user_id, &document, PermissionLevel::Manage)
            .await?;
        Ok(document)
    }

    async fn fetch_user(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use docvault_core::error::ErrorKind;

    use super::*;
    use crate::testing::Harness;

    #[tokio::test]
    async fn test_reshare_overwrites_single_row() {
        let h = Harness::new().await;
        let owner = h.user("owner").await;
        let grantee = h.user("grantee").await;
        let doc = h.document(&owner, false).await;

        let first = h
            .shares
            .share(&owner, doc.id, grantee.user_id, "view")
            .await
            .unwrap();
        assert!(first.value.created);
        assert_eq!(first.access.action, AccessAction::Share);
        assert_eq!(first.access.details, "Shared with grantee (view)");

        let second = h
            .shares
            .share(&owner, doc.id, grantee.user_id, "EDIT")
            .await
            .unwrap();
        assert!(!second.value.created);

        let shares = h.shares.list_shares(&owner, doc.id).await.unwrap();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].permission, PermissionLevel::Edit);
        assert_eq!(h.access_rows(doc.id).await.len(), 2);
    }

    #[tokio::test]
    async fn test_share_rejections() {
        let h = Harness::new().await;
        let owner = h.user("owner").await;
        let grantee = h.user("grantee").await;
        let doc = h.document(&owner, false).await;

        let err = h
            .shares
            .share(&owner, doc.id, grantee.user_id, "admin")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));

        let err = h
            .shares
            .share(&owner, doc.id, Uuid::new_v4(), "view")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));

        let err = h
            .shares
            .share(&owner, Uuid::new_v4(), grantee.user_id, "view")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));

        let err = h
            .shares
            .share(&owner, doc.id, owner.user_id, "view")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));

        let err = h
            .shares
            .share(&grantee, doc.id, grantee.user_id, "manage")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::PermissionDenied));

        assert!(h.access_rows(doc.id).await.is_empty());
    }

    #[tokio::test]
    async fn test_revoke_removes_access() {
        let h = Harness::new().await;
        let owner = h.user("owner").await;
        let grantee = h.user("grantee").await;
        let doc = h.document(&owner, false).await;
        h.share(&owner, doc.id, &grantee, PermissionLevel::View).await;

        let shared = h
            .shares
            .shared_with_me(&grantee, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(shared.total_items, 1);

        let revoked = h
            .shares
            .revoke(&owner, doc.id, grantee.user_id)
            .await
            .unwrap();
        assert_eq!(revoked.access.details, "Revoked access for grantee");

        let err = h.documents.get(&grantee, doc.id).await.unwrap_err();
        assert!(err.is(ErrorKind::PermissionDenied));

        let err = h
            .shares
            .revoke(&owner, doc.id, grantee.user_id)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_owner_grant_upgrade_scenario() {
        let h = Harness::new().await;
        let owner = h.user("owner").await;
        let alice = h.user("alice").await;
        let carol = h.user("carol").await;
        let doc = h.document(&owner, false).await;

        let err = h.documents.get(&alice, doc.id).await.unwrap_err();
        assert!(err.is(ErrorKind::PermissionDenied));

        h.shares
            .share(&owner, doc.id, alice.user_id, "comment")
            .await
            .unwrap();
        h.comments
            .add_comment(&alice, doc.id, "Please review section 2", None)
            .await
            .unwrap();

        let err = h
            .documents
            .update(
                &alice,
                doc.id,
                docvault_entity::document::UpdateDocument {
                    title: Some("Hijacked".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::PermissionDenied));
        let err = h
            .shares
            .share(&alice, doc.id, carol.user_id, "view")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::PermissionDenied));

        h.shares
            .share(&owner, doc.id, alice.user_id, "manage")
            .await
            .unwrap();
        let grant = h
            .shares
            .share(&alice, doc.id, carol.user_id, "view")
            .await
            .unwrap();
        assert_eq!(grant.value.share.shared_by, Some(alice.user_id));
        let (_, permission) = h.documents.get(&carol, doc.id).await.unwrap();
        assert_eq!(permission.level, Some(PermissionLevel::View));

        let actions: Vec<AccessAction> = h
            .access_rows(doc.id)
            .await
            .into_iter()
            .rev()
            .map(|row| row.action)
            .collect();
        assert_eq!(
            actions,
            vec![
                AccessAction::Share,
                AccessAction::Comment,
                AccessAction::Share,
                AccessAction::Share,
                AccessAction::View,
            ]
        );
    }
}
