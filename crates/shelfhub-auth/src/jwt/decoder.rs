//! Access token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use uuid::Uuid;

use shelfhub_core::config::auth::AuthConfig;
use shelfhub_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 access tokens. There is no revocation list; access
/// tokens live until they expire.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_secret(&config.jwt_secret, &config.issuer)
    }

    /// Creates a decoder for an explicit secret and issuer.
    pub fn with_secret(secret: &str, issuer: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token.
    ///
    /// Fails with `InvalidToken` on a bad signature, a malformed token,
    /// a foreign issuer, or an expiry in the past.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::invalid_token("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::invalid_token("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::invalid_token("Invalid token issuer")
                }
                _ => AppError::invalid_token(format!("Token validation failed: {e}")),
            })
    }

    /// Validates an access token and returns the bound user ID.
    pub fn resolve_user(&self, token: &str) -> Result<Uuid, AppError> {
        self.validate_access_token(token).map(|claims| claims.user_id())
    }
}
