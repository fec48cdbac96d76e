//! User handlers: registration, lookup, and self-service updates.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;
use validator::Validate;

use shelfhub_core::error::AppError;
use shelfhub_entity::location::{UserInvite, UserLocation};
use shelfhub_entity::user::User;

use super::page;
use crate::dto::request::{EmailQuery, RegisterRequest, UpdateUserRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ResponseMode};
use crate::state::AppState;

/// POST /api/users
pub async fn register(
    State(state): State<AppState>,
    mode: ResponseMode,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let outcome = match req.validate() {
        Ok(()) => {
            state
                .user_service
                .register(&req.name, &req.email, &req.password)
                .await
        }
        Err(e) => Err(AppError::validation(e.to_string())),
    };

    match (mode, outcome) {
        (ResponseMode::Json, Ok(user)) => Ok((StatusCode::CREATED, Json(user)).into_response()),
        (ResponseMode::Json, Err(e)) => Err(e.into()),
        (ResponseMode::Page, Ok(_)) => Ok(page::fragment(
            StatusCode::CREATED,
            "alert alert-success",
            "Account created. You can now log in.",
        )),
        (ResponseMode::Page, Err(e)) => Ok(page::error_fragment(e.into())),
    }
}

/// PUT /api/users
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .user_service
        .update_credentials(&auth, req.email.as_deref(), req.password.as_deref())
        .await?;
    Ok(Json(user))
}

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.user_service.list(&auth).await?))
}

/// GET /api/users/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.user_service.get(&auth, id).await?))
}

/// GET /api/search/users?email=
pub async fn find_by_email(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<EmailQuery>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(
        state.user_service.find_by_email(&auth, &query.email).await?,
    ))
}

/// GET /api/users/{id}/locations
pub async fn locations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<UserLocation>>, ApiError> {
    Ok(Json(state.user_service.locations_of(&auth, id).await?))
}

/// GET /api/users/{id}/invites
pub async fn invites(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<UserInvite>>, ApiError> {
    Ok(Json(state.user_service.invites_of(&auth, id).await?))
}
