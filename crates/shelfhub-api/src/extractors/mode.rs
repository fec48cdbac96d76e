//! Response mode negotiation for endpoints that serve both API clients and
//! browser forms.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::ACCEPT;
use axum::http::request::Parts;

/// Whether the caller wants JSON or a rendered page fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Json,
    Page,
}

impl ResponseMode {
    /// JSON when `Accept` mentions `application/json`, page otherwise.
    pub fn from_accept(accept: Option<&str>) -> Self {
        match accept {
            Some(value) if value.contains("application/json") => Self::Json,
            _ => Self::Page,
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ResponseMode {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_accept(
            parts.headers.get(ACCEPT).and_then(|v| v.to_str().ok()),
        ))
    }
}
