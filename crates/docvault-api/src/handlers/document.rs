//! Document upload, listing, detail, update, and delete handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dto::request::{DocumentFilter, UpdateDocumentRequest, UploadDocumentRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(filter): ApiQuery<DocumentFilter>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = state
        .document_service
        .list_owned(&auth, filter.category, params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": page })))
}

/// POST /api/documents
pub async fn upload_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UploadDocumentRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let document = state.document_service.upload(&auth, req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": document })),
    ))
}

/// GET /api/documents/shared
pub async fn shared_with_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = state
        .share_service
        .shared_with_me(&auth, params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": page })))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (document, permission) = state.document_service.get(&auth, id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "document": document,
            "permission": permission.level,
        }
    })))
}

/// PUT /api/documents/{id}
pub async fn update_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateDocumentRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let updated = state.document_service.update(&auth, id, req.into()).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": updated })))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.document_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Document deleted"))))
}
