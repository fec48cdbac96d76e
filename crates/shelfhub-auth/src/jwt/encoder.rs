//! Access token creation with a configured signing key and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;
use uuid::Uuid;

use shelfhub_core::config::auth::AuthConfig;
use shelfhub_core::error::AppError;

use super::claims::Claims;

/// A freshly signed access token.
#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
    /// The compact JWT.
    pub token: String,
    /// When the token stops validating.
    pub expires_at: DateTime<Utc>,
}

/// Creates HS256-signed access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    issuer: String,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_ttl(
            &config.jwt_secret,
            &config.issuer,
            Duration::minutes(config.access_token_ttl_minutes as i64),
        )
    }

    /// Creates an encoder with an explicit TTL.
    pub fn with_ttl(secret: &str, issuer: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            ttl,
        }
    }

    /// Signs an access token binding `user_id` until `now + ttl`.
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;

        let claims = Claims {
            sub: user_id,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(AccessToken { token, expires_at })
    }
}
