//! Integration tests for document upload, detail, update, delete, and categories.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["store"], "memory");
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/documents", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHORIZED");

    let response = app
        .request("GET", "/api/documents", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_and_get_document() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;

    let doc_id = app.upload(&owner, "Quarterly Report", false).await;

    let response = app
        .request("GET", &format!("/api/documents/{doc_id}"), None, Some(&owner.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["document"]["title"], "Quarterly Report");
    assert_eq!(response.data()["document"]["owner_id"], owner.id.to_string());
    assert_eq!(response.data()["permission"], "manage");
}

#[tokio::test]
async fn test_upload_rejects_empty_title() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;

    let response = app
        .request(
            "POST",
            "/api/documents",
            Some(serde_json::json!({ "title": "", "file_ref": "documents/a.pdf" })),
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;

    let response = app
        .raw_request(
            "POST",
            "/api/documents",
            "{\"title\": ".to_string(),
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_document_is_not_found() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{}", uuid::Uuid::new_v4()),
            None,
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_update_records_changed_fields() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let doc_id = app.upload(&owner, "Draft", false).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/documents/{doc_id}"),
            Some(serde_json::json!({ "title": "Final", "is_shared": true })),
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["value"]["title"], "Final");
    assert_eq!(response.data()["value"]["is_shared"], true);
    assert_eq!(response.data()["access"]["action"], "edit");
    assert_eq!(response.data()["access"]["details"], "Updated title, shared");
}

#[tokio::test]
async fn test_empty_update_is_rejected() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let doc_id = app.upload(&owner, "Draft", false).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/documents/{doc_id}"),
            Some(serde_json::json!({})),
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_owned_documents_filters_by_category() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;

    let category = app
        .request(
            "POST",
            "/api/categories",
            Some(serde_json::json!({ "name": "Contracts" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(category.status, StatusCode::CREATED);
    let category_id = category.id();

    let filed = app
        .request(
            "POST",
            "/api/documents",
            Some(serde_json::json!({
                "title": "Lease",
                "file_ref": "documents/lease.pdf",
                "category_id": category_id,
            })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(filed.status, StatusCode::CREATED);
    app.upload(&owner, "Unfiled", false).await;

    let all = app
        .request("GET", "/api/documents", None, Some(&owner.token))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.data()["total_items"], 2);

    let filtered = app
        .request(
            "GET",
            &format!("/api/documents?category={category_id}&page=1&per_page=10"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(filtered.status, StatusCode::OK);
    assert_eq!(filtered.data()["total_items"], 1);
    assert_eq!(filtered.data()["items"][0]["title"], "Lease");
}

#[tokio::test]
async fn test_deleting_category_uncategorizes_documents() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;

    let category_id = app
        .request(
            "POST",
            "/api/categories",
            Some(serde_json::json!({ "name": "Invoices" })),
            Some(&owner.token),
        )
        .await
        .id();

    let doc_id = app
        .request(
            "POST",
            "/api/documents",
            Some(serde_json::json!({
                "title": "March",
                "file_ref": "documents/march.pdf",
                "category_id": category_id,
            })),
            Some(&owner.token),
        )
        .await
        .id();

    let response = app
        .request(
            "DELETE",
            &format!("/api/categories/{category_id}"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/documents/{doc_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["document"]["category_id"].is_null());
}

#[tokio::test]
async fn test_delete_document_is_owner_only() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let manager = app.create_user("manager").await;
    let doc_id = app.upload(&owner, "Board Minutes", false).await;

    app.share(&owner, doc_id, &manager, "manage").await;

    let response = app
        .request("DELETE", &format!("/api/documents/{doc_id}"), None, Some(&manager.token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/api/documents/{doc_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/documents/{doc_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_lists_views_newest_first() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let doc_id = app.upload(&owner, "Audit Me", false).await;

    app.request("GET", &format!("/api/documents/{doc_id}"), None, Some(&owner.token))
        .await;
    app.request(
        "PUT",
        &format!("/api/documents/{doc_id}"),
        Some(serde_json::json!({ "description": "updated" })),
        Some(&owner.token),
    )
    .await;

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{doc_id}/history"),
            None,
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.data()["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["action"], "edit");
    assert_eq!(items[1]["action"], "view");
}
