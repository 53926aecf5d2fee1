//! Per-user sharing handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dto::request::ShareRequest;
use crate::error::ApiError;
use crate::extractors::{ApiPath, AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/documents/{id}/shares
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(document_id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let shares = state.share_service.list_shares(&auth, document_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": shares })))
}

/// POST /api/documents/{id}/shares
///
/// Responds 201 for a new grant and 200 when an existing grant was
/// overwritten.
pub async fn share_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(document_id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<ShareRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let grant = state
        .share_service
        .share(&auth, document_id, req.user_id, &req.permission)
        .await?;

    let status = if grant.value.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(serde_json::json!({ "success": true, "data": grant })),
    ))
}

/// DELETE /api/documents/{id}/shares/{user_id}
pub async fn revoke_share(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((document_id, user_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let revoked = state
        .share_service
        .revoke(&auth, document_id, user_id)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": revoked })))
}
