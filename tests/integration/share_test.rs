//! Integration tests for per-user sharing.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_share_creates_then_overwrites_one_grant() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let alice = app.create_user("alice").await;
    let doc_id = app.upload(&owner, "Design Doc", false).await;

    let first = app.share(&owner, doc_id, &alice, "view").await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.data()["value"]["permission"], "view");
    assert_eq!(first.data()["value"]["created"], true);
    assert_eq!(first.data()["access"]["action"], "share");
    assert_eq!(first.data()["access"]["details"], "Shared with alice (view)");

    let second = app.share(&owner, doc_id, &alice, "EDIT").await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.data()["value"]["permission"], "edit");
    assert_eq!(second.data()["value"]["created"], false);

    let shares = app
        .request(
            "GET",
            &format!("/api/documents/{doc_id}/shares"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(shares.status, StatusCode::OK);
    let rows = shares.data().as_array().expect("share list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["shared_with"], alice.id.to_string());
}

#[tokio::test]
async fn test_unknown_permission_is_a_validation_error() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let alice = app.create_user("alice").await;
    let doc_id = app.upload(&owner, "Design Doc", false).await;

    let response = app.share(&owner, doc_id, &alice, "admin").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_share_with_unknown_user_is_not_found() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let doc_id = app.upload(&owner, "Design Doc", false).await;

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{doc_id}/shares"),
            Some(serde_json::json!({
                "user_id": uuid::Uuid::new_v4(),
                "permission": "view",
            })),
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_revoke_removes_access() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let alice = app.create_user("alice").await;
    let doc_id = app.upload(&owner, "Design Doc", false).await;
    app.share(&owner, doc_id, &alice, "comment").await;

    let before = app
        .request("GET", &format!("/api/documents/{doc_id}"), None, Some(&alice.token))
        .await;
    assert_eq!(before.status, StatusCode::OK);

    let revoked = app
        .request(
            "DELETE",
            &format!("/api/documents/{doc_id}/shares/{}", alice.id),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(revoked.status, StatusCode::OK);
    assert_eq!(revoked.data()["access"]["details"], "Revoked access for alice");

    let after = app
        .request("GET", &format!("/api/documents/{doc_id}"), None, Some(&alice.token))
        .await;
    assert_eq!(after.status, StatusCode::FORBIDDEN);

    let again = app
        .request(
            "DELETE",
            &format!("/api/documents/{doc_id}/shares/{}", alice.id),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shared_with_me_lists_granted_documents() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let alice = app.create_user("alice").await;
    let granted = app.upload(&owner, "Granted", false).await;
    app.upload(&owner, "Not Granted", false).await;
    app.share(&owner, granted, &alice, "view").await;

    let response = app
        .request("GET", "/api/documents/shared", None, Some(&alice.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["total_items"], 1);
    assert_eq!(response.data()["items"][0]["id"], granted.to_string());
}

#[tokio::test]
async fn test_owner_comment_manage_scenario() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let alice = app.create_user("alice").await;
    let carol = app.create_user("carol").await;
    let doc_id = app.upload(&owner, "Contract", false).await;

    // no grant yet
    let denied = app
        .request("GET", &format!("/api/documents/{doc_id}"), None, Some(&alice.token))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    // COMMENT: may comment, may not edit or share
    app.share(&owner, doc_id, &alice, "comment").await;

    let commented = app
        .request(
            "POST",
            &format!("/api/documents/{doc_id}/comments"),
            Some(serde_json::json!({ "content": "Clause 4 needs review" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(commented.status, StatusCode::CREATED);

    let edit = app
        .request(
            "PUT",
            &format!("/api/documents/{doc_id}"),
            Some(serde_json::json!({ "title": "Contract v2" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(edit.status, StatusCode::FORBIDDEN);

    let reshare = app.share(&alice, doc_id, &carol, "view").await;
    assert_eq!(reshare.status, StatusCode::FORBIDDEN);

    // MANAGE: may now share onward
    app.share(&owner, doc_id, &alice, "manage").await;
    let reshare = app.share(&alice, doc_id, &carol, "view").await;
    assert_eq!(reshare.status, StatusCode::CREATED);
    assert_eq!(reshare.data()["value"]["shared_by"], alice.id.to_string());

    let carol_view = app
        .request("GET", &format!("/api/documents/{doc_id}"), None, Some(&carol.token))
        .await;
    assert_eq!(carol_view.status, StatusCode::OK);
    assert_eq!(carol_view.data()["permission"], "view");
}
