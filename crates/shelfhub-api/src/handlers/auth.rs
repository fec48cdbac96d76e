//! Session handlers: login, refresh, revoke, revoke-all.
//!
//! Login answers API clients with JSON and browsers with cookies plus an
//! HTML fragment, picked from the `Accept` header.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use shelfhub_core::config::auth::AuthConfig;
use shelfhub_core::error::AppError;

use super::page;
use crate::dto::request::LoginRequest;
use crate::dto::response::{LoginResponse, RefreshResponse, RevokeAllResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, RefreshCredential, ResponseMode};
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    mode: ResponseMode,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let outcome = match req.validate() {
        Ok(()) => state.session_manager.login(&req.email, &req.password).await,
        Err(e) => Err(AppError::validation(e.to_string())),
    };

    match (mode, outcome) {
        (ResponseMode::Json, Ok(result)) => Ok(Json(LoginResponse {
            user: result.user,
            access_token: result.access_token.token,
            access_token_expires_at: result.access_token.expires_at,
            refresh_token: result.refresh_token,
            refresh_token_expires_at: result.refresh_expires_at,
        })
        .into_response()),
        (ResponseMode::Json, Err(e)) => Err(e.into()),
        (ResponseMode::Page, Ok(result)) => {
            let auth = &state.config.auth;
            let jar = CookieJar::new()
                .add(access_cookie(auth, result.access_token.token))
                .add(refresh_cookie(auth, result.refresh_token));
            Ok((
                jar,
                page::fragment(StatusCode::OK, "alert alert-success", "Login successful"),
            )
                .into_response())
        }
        (ResponseMode::Page, Err(e)) => Ok(page::error_fragment(e.into())),
    }
}

/// POST /api/refresh
pub async fn refresh(
    State(state): State<AppState>,
    mode: ResponseMode,
    RefreshCredential(token): RefreshCredential,
) -> Result<Response, ApiError> {
    let access = state.session_manager.refresh(&token).await?;
    let body = Json(RefreshResponse {
        access_token: access.token.clone(),
        expires_at: access.expires_at,
    });

    Ok(match mode {
        ResponseMode::Json => body.into_response(),
        ResponseMode::Page => {
            let jar = CookieJar::new().add(access_cookie(&state.config.auth, access.token));
            (jar, body).into_response()
        }
    })
}

/// POST /api/revoke
pub async fn revoke(
    State(state): State<AppState>,
    RefreshCredential(token): RefreshCredential,
) -> Result<Response, ApiError> {
    state.session_manager.revoke(&token).await?;

    let auth = &state.config.auth;
    let jar = CookieJar::new()
        .add(expired_cookie(&auth.access_cookie_name))
        .add(expired_cookie(&auth.refresh_cookie_name));
    Ok((StatusCode::NO_CONTENT, jar).into_response())
}

/// POST /api/revoke-all
pub async fn revoke_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<RevokeAllResponse>, ApiError> {
    let revoked = state.session_manager.revoke_all(auth.user_id).await?;
    Ok(Json(RevokeAllResponse { revoked }))
}

fn access_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    session_cookie(
        config,
        config.access_cookie_name.clone(),
        token,
        time::Duration::minutes(config.access_token_ttl_minutes as i64),
    )
}

fn refresh_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    session_cookie(
        config,
        config.refresh_cookie_name.clone(),
        token,
        time::Duration::days(config.refresh_token_ttl_days as i64),
    )
}

fn session_cookie(
    config: &AuthConfig,
    name: String,
    value: String,
    max_age: time::Duration,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

fn expired_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), String::new()))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::ZERO)
        .build()
}
