//! Operational endpoints.

use axum::Json;
use axum::extract::State;

use crate::dto::response::ResetResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /admin/healthz
pub async fn healthz() -> &'static str {
    "OK"
}

/// POST /admin/reset
///
/// Deletes every user and everything hanging off them. Refused unless the
/// server runs on the `dev` platform.
pub async fn reset(State(state): State<AppState>) -> Result<Json<ResetResponse>, ApiError> {
    let deleted_users = state
        .user_service
        .reset_all(state.config.server.platform)
        .await?;
    Ok(Json(ResetResponse { deleted_users }))
}
