//! Location, membership, and invitation handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use shelfhub_core::error::AppError;
use shelfhub_entity::location::{
    Invitation, Location, LocationInvite, LocationMember, Membership, UserLocation,
};

use crate::dto::request::{InviteRequest, JoinRequest, NameRequest, OwnerQuery};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/locations
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NameRequest>,
) -> Result<(StatusCode, Json<Location>), ApiError> {
    let location = state.location_service.create(&auth, &req.name).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

/// GET /api/locations
pub async fn list_joined(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserLocation>>, ApiError> {
    Ok(Json(state.location_service.list_joined(&auth).await?))
}

/// GET /api/locations/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Location>, ApiError> {
    Ok(Json(state.location_service.get(&auth, id).await?))
}

/// GET /api/search/locations?owner_id=
pub async fn find_by_owner(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<Location>>, ApiError> {
    Ok(Json(
        state
            .location_service
            .list_owned_by(&auth, query.owner_id)
            .await?,
    ))
}

/// GET /api/locations/{id}/members
pub async fn members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LocationMember>>, ApiError> {
    Ok(Json(state.location_service.members(&auth, id).await?))
}

/// GET /api/locations/{id}/invites
pub async fn invites(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LocationInvite>>, ApiError> {
    Ok(Json(state.location_service.invites(&auth, id).await?))
}

/// POST /api/locations/{id}/invites
pub async fn invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<InviteRequest>,
) -> Result<(StatusCode, Json<Invitation>), ApiError> {
    let invitation = state.location_service.invite(&auth, id, req.user_id).await?;
    Ok((StatusCode::CREATED, Json(invitation)))
}

/// POST /api/locations/{id}/members
///
/// The body is optional; an empty body joins the caller.
pub async fn join(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<(StatusCode, Json<Membership>), ApiError> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        JoinRequest::default()
    } else {
        serde_json::from_slice::<JoinRequest>(&body)
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?
    };

    let membership = state.location_service.join(&auth, id, req.user_id).await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

/// DELETE /api/locations/{id}/invites/{user_id}
pub async fn remove_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state
        .location_service
        .remove_invite(&auth, id, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/locations/{id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state
        .location_service
        .remove_member(&auth, id, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
