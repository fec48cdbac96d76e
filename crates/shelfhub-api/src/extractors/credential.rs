//! Bearer credential sourcing: the `Authorization` header first, then a
//! named cookie.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use shelfhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Returns the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// Returns the value of cookie `name`.
pub fn cookie_token(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads a bearer credential from the header, falling back to `cookie_name`.
pub fn extract_bearer(headers: &HeaderMap, cookie_name: &str) -> Result<String, AppError> {
    bearer_token(headers)
        .or_else(|| cookie_token(headers, cookie_name))
        .ok_or_else(|| AppError::missing_credential("No bearer credential provided"))
}

/// The refresh token presented with a refresh or revoke request.
#[derive(Debug, Clone)]
pub struct RefreshCredential(pub String);

impl FromRequestParts<AppState> for RefreshCredential {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers, &state.config.auth.refresh_cookie_name)?;
        Ok(Self(token))
    }
}
