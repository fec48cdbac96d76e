//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfhub_entity::user::User;

/// Login response for API clients.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
}

/// A freshly minted access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Outcome of a revoke-all request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeAllResponse {
    /// Tokens revoked by this call.
    pub revoked: u64,
}

/// Outcome of a development reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    /// Users deleted.
    pub deleted_users: u64,
}
