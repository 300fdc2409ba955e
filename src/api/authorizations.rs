//! Authorization Request Endpoints
//! Mission: Submit, list, and update insurance authorization requests

use crate::api::{error::ApiError, routes::AppState};
use crate::auth::AuthContext;
use crate::models::{AuthorizationRequest, NewAuthorizationRequest, StatusUpdate};
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;
use uuid::Uuid;

/// Submit an authorization request - POST /api/authorization
pub async fn create_authorization(
    State(state): State<AppState>,
    Json(payload): Json<NewAuthorizationRequest>,
) -> Result<(StatusCode, Json<AuthorizationRequest>), ApiError> {
    let request = state.records.insert_authorization(payload)?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// List all authorization requests - GET /api/authorization
pub async fn list_authorizations(
    State(state): State<AppState>,
) -> Result<Json<Vec<AuthorizationRequest>>, ApiError> {
    let requests = state.records.list_authorizations()?;
    Ok(Json(requests))
}

/// Update the status of an authorization request - PATCH /api/authorization/:id
///
/// Any authenticated subject may change the status; there is no role
/// distinction between clinicians and other accounts.
pub async fn update_authorization(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<AuthorizationRequest>, ApiError> {
    let updated = state
        .records
        .update_authorization_status(&id, payload.status)?
        .ok_or_else(|| ApiError::NotFound("Authorization request not found".to_string()))?;

    info!(
        "Authorization request {} set to {} by subject {}",
        id,
        payload.status.as_str(),
        ctx.subject_id
    );

    Ok(Json(updated))
}
