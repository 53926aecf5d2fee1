//! Access history handler.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/documents/{id}/history
pub async fn document_history(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(document_id): ApiPath<Uuid>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let history = state
        .history_service
        .history(&auth, document_id, params.into_page_request())
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": history })))
}
