//! Integration tests for comments and annotations.

mod helpers;

use http::StatusCode;
use uuid::Uuid;

async fn add_comment(
    app: &helpers::TestApp,
    user: &helpers::TestUser,
    doc_id: Uuid,
    content: &str,
    parent_id: Option<Uuid>,
) -> helpers::TestResponse {
    app.request(
        "POST",
        &format!("/api/documents/{doc_id}/comments"),
        Some(serde_json::json!({ "content": content, "parent_id": parent_id })),
        Some(&user.token),
    )
    .await
}

#[tokio::test]
async fn test_comments_list_in_creation_order_with_author() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let doc_id = app.upload(&owner, "Notes", false).await;

    let first = add_comment(&app, &owner, doc_id, "first", None).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.data()["value"]["author_name"], "owner");
    assert_eq!(first.data()["access"]["action"], "comment");
    assert_eq!(first.data()["access"]["details"], "Added comment");
    add_comment(&app, &owner, doc_id, "second", None).await;

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{doc_id}/comments"),
            None,
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let comments = response.data().as_array().expect("comment list");
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "first");
    assert_eq!(comments[1]["content"], "second");
}

#[tokio::test]
async fn test_replies_nest_when_threaded() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let doc_id = app.upload(&owner, "Notes", false).await;

    let root = add_comment(&app, &owner, doc_id, "question", None).await;
    let root_id = root.data()["value"]["id"]
        .as_str()
        .and_then(|s| s.parse::<Uuid>().ok())
        .expect("comment id");

    let reply = add_comment(&app, &owner, doc_id, "answer", Some(root_id)).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.data()["access"]["details"], "Replied to a comment");

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{doc_id}/comments?threaded=true"),
            None,
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let threads = response.data().as_array().expect("threads");
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0]["comment"]["content"], "question");
    assert_eq!(threads[0]["replies"][0]["comment"]["content"], "answer");
}

#[tokio::test]
async fn test_unknown_parent_makes_top_level_comment() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let doc_id = app.upload(&owner, "Notes", false).await;

    let response = add_comment(&app, &owner, doc_id, "orphan", Some(Uuid::new_v4())).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.data()["value"]["parent_id"].is_null());
}

#[tokio::test]
async fn test_deleting_comment_promotes_replies() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let doc_id = app.upload(&owner, "Notes", false).await;

    let root = add_comment(&app, &owner, doc_id, "root", None).await;
    let root_id = root.data()["value"]["id"].as_str().expect("id").to_string();
    let root_uuid: Uuid = root_id.parse().expect("uuid");
    add_comment(&app, &owner, doc_id, "reply", Some(root_uuid)).await;

    let deleted = app
        .request("DELETE", &format!("/api/comments/{root_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{doc_id}/comments"),
            None,
            Some(&owner.token),
        )
        .await;
    let comments = response.data().as_array().expect("comment list");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["content"], "reply");
    assert!(comments[0]["parent_id"].is_null());
}

#[tokio::test]
async fn test_only_author_or_manager_deletes_comment() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let doc_id = app.upload(&owner, "Notes", false).await;
    app.share(&owner, doc_id, &alice, "comment").await;
    app.share(&owner, doc_id, &bob, "comment").await;

    let comment = add_comment(&app, &alice, doc_id, "mine", None).await;
    let comment_id = comment.data()["value"]["id"].as_str().expect("id").to_string();

    let by_bob = app
        .request("DELETE", &format!("/api/comments/{comment_id}"), None, Some(&bob.token))
        .await;
    assert_eq!(by_bob.status, StatusCode::FORBIDDEN);

    let by_owner = app
        .request("DELETE", &format!("/api/comments/{comment_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(by_owner.status, StatusCode::OK);
}

#[tokio::test]
async fn test_annotations_accept_numeric_strings_and_filter_by_page() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let doc_id = app.upload(&owner, "Blueprint", false).await;

    let first = app
        .request(
            "POST",
            &format!("/api/documents/{doc_id}/annotations"),
            Some(serde_json::json!({ "content": "check this", "x": "12.5", "y": 40 })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.data()["value"]["x"], 12.5);
    assert_eq!(first.data()["value"]["page"], 1);
    assert_eq!(first.data()["value"]["author_name"], "owner");
    assert_eq!(first.data()["access"]["details"], "Added annotation");

    let second = app
        .request(
            "POST",
            &format!("/api/documents/{doc_id}/annotations"),
            Some(serde_json::json!({ "content": "and this", "x": 1, "y": 2, "page": 3 })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(second.status, StatusCode::CREATED);

    let page_three = app
        .request(
            "GET",
            &format!("/api/documents/{doc_id}/annotations?page=3"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(page_three.status, StatusCode::OK);
    let items = page_three.data().as_array().expect("annotations");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["content"], "and this");
}

#[tokio::test]
async fn test_non_numeric_coordinates_are_rejected() {
    let app = helpers::TestApp::new().await;
    let owner = app.create_user("owner").await;
    let doc_id = app.upload(&owner, "Blueprint", false).await;

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{doc_id}/annotations"),
            Some(serde_json::json!({ "content": "here", "x": "left", "y": 2 })),
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let history = app
        .request(
            "GET",
            &format!("/api/documents/{doc_id}/history"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(history.data()["total_items"], 0);
}
