//! Integration tests for effective permission resolution over HTTP.

mod helpers;

use http::StatusCode;
use uuid::Uuid;

async fn comment_status(app: &helpers::TestApp, doc_id: Uuid, user: &helpers::TestUser) -> StatusCode {
    app.request(
        "POST",
        &format!("/api/documents/{doc_id}/comments"),
        Some(serde_json::json!({ "content": "noted" })),
        Some(&user.token),
    )
    .await
    .status
}

async fn edit_status(app: &helpers::TestApp, doc_id: Uuid, user: &helpers::TestUser) -> StatusCode {
    app.request(
        "PUT",
        &format!("/api/documents/{doc_id}"),
        Some(serde_json::json!({ "description": "revised" })),
        Some(&user.token),
    )
    .await
    .status
}

#[tokio::test]
async fn test_private_document_is_hidden_from_other_users() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let stranger = app.create_user("stranger").await;
    let doc_id = app.upload(&owner, "Private Notes", false).await;

    let response = app
        .request("GET", &format!("/api/documents/{doc_id}"), None, Some(&stranger.token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "PERMISSION_DENIED");
}

#[tokio::test]
async fn test_shared_flag_grants_view_only() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let reader = app.create_user("reader").await;
    let doc_id = app.upload(&owner, "Handbook", true).await;

    let response = app
        .request("GET", &format!("/api/documents/{doc_id}"), None, Some(&reader.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["permission"], "view");

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{doc_id}/comments"),
            Some(serde_json::json!({ "content": "Typo on page 3" })),
            Some(&reader.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_keeps_manage_despite_share_row() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let doc_id = app.upload(&owner, "Roadmap", false).await;

    // sharing with yourself is refused, so ownership alone decides
    let response = app.share(&owner, doc_id, &owner, "view").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{doc_id}/history"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_levels_gate_each_action() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let viewer = app.create_user("viewer").await;
    let commenter = app.create_user("commenter").await;
    let editor = app.create_user("editor").await;
    let doc_id = app.upload(&owner, "Spec Draft", false).await;

    app.share(&owner, doc_id, &viewer, "view").await;
    app.share(&owner, doc_id, &commenter, "comment").await;
    app.share(&owner, doc_id, &editor, "edit").await;

    assert_eq!(comment_status(&app, doc_id, &viewer).await, StatusCode::FORBIDDEN);
    assert_eq!(comment_status(&app, doc_id, &commenter).await, StatusCode::CREATED);
    assert_eq!(comment_status(&app, doc_id, &editor).await, StatusCode::CREATED);

    assert_eq!(edit_status(&app, doc_id, &commenter).await, StatusCode::FORBIDDEN);
    assert_eq!(edit_status(&app, doc_id, &editor).await, StatusCode::OK);

    let history = app
        .request(
            "GET",
            &format!("/api/documents/{doc_id}/history"),
            None,
            Some(&editor.token),
        )
        .await;
    assert_eq!(history.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_edit_grantee_cannot_publish_document() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let editor = app.create_user("editor").await;
    let manager = app.create_user("manager").await;
    let outsider = app.create_user("outsider").await;
    let doc_id = app.upload(&owner, "Board Minutes", false).await;
    app.share(&owner, doc_id, &editor, "edit").await;
    app.share(&owner, doc_id, &manager, "manage").await;

    let publish = serde_json::json!({ "is_shared": true });
    let response = app
        .request(
            "PUT",
            &format!("/api/documents/{doc_id}"),
            Some(publish.clone()),
            Some(&editor.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "PERMISSION_DENIED");

    let detail = app
        .request("GET", &format!("/api/documents/{doc_id}"), None, Some(&outsider.token))
        .await;
    assert_eq!(detail.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            &format!("/api/documents/{doc_id}"),
            Some(publish),
            Some(&manager.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let detail = app
        .request("GET", &format!("/api/documents/{doc_id}"), None, Some(&outsider.token))
        .await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.data()["permission"], "view");
}

#[tokio::test]
async fn test_token_for_deleted_or_unknown_user_is_rejected() {
    let app = helpers::TestApp::new().await;
    let ghost = docvault_auth::jwt::JwtEncoder::new(&app.config.auth)
        .issue(Uuid::new_v4(), "ghost")
        .expect("issue token");

    let response = app
        .request("GET", "/api/documents", None, Some(&ghost.0))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = helpers::TestApp::new().await;
    let user = app.create_user("owner").await;

    let mut other = app.config.auth.clone();
    other.jwt_secret = "some-other-secret".to_string();
    let (forged, _) = docvault_auth::jwt::JwtEncoder::new(&other)
        .issue(user.id, "owner")
        .expect("issue token");

    let response = app
        .request("GET", "/api/documents", None, Some(&forged))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
