//! Shelf handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use shelfhub_entity::catalog::{NewShelf, Shelf};

use crate::dto::request::NameRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/shelves
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewShelf>,
) -> Result<(StatusCode, Json<Shelf>), ApiError> {
    let shelf = state.shelf_service.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(shelf)))
}

/// GET /api/shelves/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Shelf>, ApiError> {
    Ok(Json(state.shelf_service.get(&auth, id).await?))
}

/// PUT /api/shelves/{id}
pub async fn rename(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<NameRequest>,
) -> Result<Json<Shelf>, ApiError> {
    Ok(Json(state.shelf_service.rename(&auth, id, &req.name).await?))
}

/// DELETE /api/shelves/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.shelf_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/cases/{id}/shelves
pub async fn list_by_case(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Shelf>>, ApiError> {
    Ok(Json(state.shelf_service.list_by_case(&auth, id).await?))
}
