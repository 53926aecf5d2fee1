//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use docvault_api::{AppState, build_router};
use docvault_auth::jwt::JwtEncoder;
use docvault_core::config::AppConfig;
use docvault_database::Stores;
use docvault_service::UserService;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory stores behind the router, for direct inspection
    pub stores: Stores,
    /// Application config
    pub config: AppConfig,
}

/// A registered user with a valid bearer token
#[derive(Debug, Clone)]
pub struct TestUser {
    /// User id
    pub id: Uuid,
    /// Bearer token
    pub token: String,
}

impl TestApp {
    /// Create a new test application backed by an empty in-memory store
    pub async fn new() -> Self {
        let config = AppConfig::from_file("tests/fixtures/test_config.toml")
            .expect("Failed to load test config");

        let stores = Stores::connect(&config.database)
            .await
            .expect("Failed to init stores");

        let router = build_router(AppState::new(config.clone(), stores.clone()));

        Self {
            router,
            stores,
            config,
        }
    }

    /// Register a user and mint a token for them
    pub async fn create_user(&self, username: &str) -> TestUser {
        let user = UserService::new(self.stores.users.clone())
            .register(None, username, None)
            .await
            .expect("Failed to create test user");

        let (token, _) = JwtEncoder::new(&self.config.auth)
            .issue(user.id, &user.username)
            .expect("Failed to issue token");

        TestUser { id: user.id, token }
    }

    /// Upload a document and return its id
    pub async fn upload(&self, owner: &TestUser, title: &str, is_shared: bool) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/documents",
                Some(serde_json::json!({
                    "title": title,
                    "description": "integration test document",
                    "file_ref": format!("documents/{title}.pdf"),
                    "is_shared": is_shared,
                })),
                Some(&owner.token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Upload failed: {:?}",
            response.body
        );
        response.id()
    }

    /// Share `document_id` with `grantee` at `permission`
    pub async fn share(
        &self,
        actor: &TestUser,
        document_id: Uuid,
        grantee: &TestUser,
        permission: &str,
    ) -> TestResponse {
        self.request(
            "POST",
            &format!("/api/documents/{document_id}/shares"),
            Some(serde_json::json!({
                "user_id": grantee.id,
                "permission": permission,
            })),
            Some(&actor.token),
        )
        .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.raw_request(method, path, body_str, token).await
    }

    /// Make an HTTP request with a literal body
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` code of an error envelope
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    /// `data.id` parsed as a UUID
    pub fn id(&self) -> Uuid {
        self.data()["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("Response has no data.id")
    }
}
