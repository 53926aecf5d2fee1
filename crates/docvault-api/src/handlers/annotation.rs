//! Annotation handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dto::request::{AddAnnotationRequest, AnnotationQuery};
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/documents/{id}/annotations
pub async fn list_annotations(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(document_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<AnnotationQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let annotations = state
        .annotation_service
        .list_annotations(&auth, document_id, query.page)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": annotations })))
}

/// POST /api/documents/{id}/annotations
pub async fn add_annotation(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(document_id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<AddAnnotationRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let annotation = state
        .annotation_service
        .add_annotation(&auth, document_id, req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": annotation })),
    ))
}
