//! Comment handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use docvault_core::error::AppError;

use crate::dto::request::{AddCommentRequest, CommentQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/documents/{id}/comments
///
/// Flat and ascending by default; `?threaded=true` nests replies.
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(document_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<CommentQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let data = if query.threaded {
        let threads = state
            .comment_service
            .comment_threads(&auth, document_id)
            .await?;
        serde_json::to_value(threads).map_err(AppError::from)?
    } else {
        let comments = state
            .comment_service
            .list_comments(&auth, document_id)
            .await?;
        serde_json::to_value(comments).map_err(AppError::from)?
    };

    Ok(Json(serde_json::json!({ "success": true, "data": data })))
}

/// POST /api/documents/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(document_id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<AddCommentRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let comment = state
        .comment_service
        .add_comment(&auth, document_id, &req.content, req.parent_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": comment })),
    ))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(comment_id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.comment_service.delete_comment(&auth, comment_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Comment deleted"))))
}
