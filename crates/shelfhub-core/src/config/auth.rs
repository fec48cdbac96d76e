//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing, lifetimes, and cookie transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Required.
    #[serde(default)]
    pub jwt_secret: String,
    /// Value of the `iss` claim on issued access tokens.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// Cookie carrying the access token for browser sessions.
    #[serde(default = "default_access_cookie")]
    pub access_cookie_name: String,
    /// Cookie carrying the refresh token for browser sessions.
    #[serde(default = "default_refresh_cookie")]
    pub refresh_cookie_name: String,
    /// Mark session cookies `Secure`.
    #[serde(default = "default_true")]
    pub secure_cookies: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: default_issuer(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl(),
            access_cookie_name: default_access_cookie(),
            refresh_cookie_name: default_refresh_cookie(),
            secure_cookies: true,
        }
    }
}

fn default_issuer() -> String {
    "shelfhub".to_string()
}

fn default_access_ttl() -> u64 {
    60
}

fn default_refresh_ttl() -> u64 {
    60
}

fn default_access_cookie() -> String {
    "accessToken".to_string()
}

fn default_refresh_cookie() -> String {
    "refreshToken".to_string()
}

fn default_true() -> bool {
    true
}
