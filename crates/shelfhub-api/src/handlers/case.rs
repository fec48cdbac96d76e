//! Case handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use shelfhub_entity::catalog::{Case, NewCase};

use crate::dto::request::NameRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/cases
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewCase>,
) -> Result<(StatusCode, Json<Case>), ApiError> {
    let case = state.case_service.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(case)))
}

/// GET /api/cases/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Case>, ApiError> {
    Ok(Json(state.case_service.get(&auth, id).await?))
}

/// PUT /api/cases/{id}
pub async fn rename(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<NameRequest>,
) -> Result<Json<Case>, ApiError> {
    Ok(Json(state.case_service.rename(&auth, id, &req.name).await?))
}

/// DELETE /api/cases/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.case_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/locations/{id}/cases
pub async fn list_by_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Case>>, ApiError> {
    Ok(Json(state.case_service.list_by_location(&auth, id).await?))
}
