//! Route definitions for the DocVault HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(category_routes())
        .merge(document_routes())
        .merge(share_routes())
        .merge(discussion_routes())
        .merge(history_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(state.config.server.max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/categories/{id}",
            delete(handlers::category::delete_category),
        )
}

/// Document CRUD and the shared-with-me listing
fn document_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents",
            get(handlers::document::list_documents).post(handlers::document::upload_document),
        )
        .route("/documents/shared", get(handlers::document::shared_with_me))
        .route(
            "/documents/{id}",
            get(handlers::document::get_document)
                .put(handlers::document::update_document)
                .delete(handlers::document::delete_document),
        )
}

fn share_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents/{id}/shares",
            get(handlers::share::list_shares).post(handlers::share::share_document),
        )
        .route(
            "/documents/{id}/shares/{user_id}",
            delete(handlers::share::revoke_share),
        )
}

/// Comments and annotations
fn discussion_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents/{id}/comments",
            get(handlers::comment::list_comments).post(handlers::comment::add_comment),
        )
        .route("/comments/{id}", delete(handlers::comment::delete_comment))
        .route(
            "/documents/{id}/annotations",
            get(handlers::annotation::list_annotations)
                .post(handlers::annotation::add_annotation),
        )
}

fn history_routes() -> Router<AppState> {
    Router::new().route(
        "/documents/{id}/history",
        get(handlers::history::document_history),
    )
}
