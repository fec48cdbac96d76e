//! `AuthUser` extractor: resolves the caller from an access token in the
//! `Authorization` header or the access-token cookie.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use shelfhub_service::context::RequestContext;

use super::credential::extract_bearer;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers, &state.config.auth.access_cookie_name)?;
        let user_id = state.jwt_decoder.resolve_user(&token)?;
        Ok(AuthUser(RequestContext::new(user_id)))
    }
}
