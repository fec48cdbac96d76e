//! Session lifecycle: login, refresh, revoke, revoke-all.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use shelfhub_core::config::auth::AuthConfig;
use shelfhub_core::error::AppError;
use shelfhub_database::store::{RefreshTokenStore, UserStore};
use shelfhub_entity::user::User;

use crate::jwt::{AccessToken, JwtEncoder};
use crate::password::PasswordHasher;

use super::token::generate_refresh_token;

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// Short-lived access token.
    pub access_token: AccessToken,
    /// Long-lived opaque refresh token.
    pub refresh_token: String,
    /// Refresh token expiry.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Manages the refresh-token session lifecycle.
///
/// Access tokens are never tracked; revocation acts on refresh tokens only,
/// so an issued access token stays valid until it expires.
#[derive(Clone)]
pub struct SessionManager {
    jwt_encoder: Arc<JwtEncoder>,
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn RefreshTokenStore>,
    password_hasher: Arc<PasswordHasher>,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn RefreshTokenStore>,
        password_hasher: Arc<PasswordHasher>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            jwt_encoder,
            users,
            tokens,
            password_hasher,
            refresh_ttl: Duration::days(config.refresh_token_ttl_days as i64),
        }
    }

    /// Verifies credentials, then issues an access token and a persisted
    /// refresh token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let Some(user) = self.users.find_user_by_email(email.trim()).await? else {
            self.password_hasher.verify_decoy(password);
            warn!(email = %email, "Login attempt for unknown email");
            return Err(AppError::authentication("Incorrect email or password"));
        };

        if !self
            .password_hasher
            .verify_password(password, &user.hashed_password)?
        {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::authentication("Incorrect email or password"));
        }

        let access_token = self.jwt_encoder.issue_access_token(user.id)?;

        let refresh_token = generate_refresh_token();
        let refresh_expires_at = Utc::now() + self.refresh_ttl;
        self.tokens
            .create_refresh_token(user.id, &refresh_token, refresh_expires_at)
            .await?;

        info!(
            user_id = %user.id,
            access_expires_at = %access_token.expires_at,
            refresh_expires_at = %refresh_expires_at,
            "Login successful"
        );

        Ok(LoginResult {
            user,
            access_token,
            refresh_token,
            refresh_expires_at,
        })
    }

    /// Issues a new access token for a valid refresh token.
    ///
    /// The refresh token itself is not rotated and stays usable.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AppError> {
        let stored = self
            .tokens
            .find_refresh_token(refresh_token)
            .await?
            .ok_or_else(|| AppError::session("Couldn't get user for refresh token"))?;

        let now = Utc::now();
        if stored.is_revoked() {
            warn!(user_id = %stored.user_id, "Refresh with revoked token");
            return Err(AppError::session("Refresh token has been revoked"));
        }
        if stored.is_expired_at(now) {
            warn!(user_id = %stored.user_id, "Refresh with expired token");
            return Err(AppError::session("Refresh token has expired"));
        }

        let user = self
            .users
            .find_user_by_id(stored.user_id)
            .await?
            .ok_or_else(|| AppError::session("Couldn't get user for refresh token"))?;

        let access_token = self.jwt_encoder.issue_access_token(user.id)?;
        info!(user_id = %user.id, expires_at = %access_token.expires_at, "Access token refreshed");
        Ok(access_token)
    }

    /// Revokes one refresh token. Revoking an already revoked token succeeds
    /// and keeps the original revocation time.
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AppError> {
        if !self.tokens.revoke_refresh_token(refresh_token).await? {
            return Err(AppError::not_found("Refresh token not found"));
        }
        info!("Refresh token revoked");
        Ok(())
    }

    /// Revokes every refresh token of `user_id`. Returns how many tokens
    /// this call revoked; a repeat call returns zero.
    pub async fn revoke_all(&self, user_id: Uuid) -> Result<u64, AppError> {
        let revoked = self.tokens.revoke_all_refresh_tokens(user_id).await?;
        info!(user_id = %user_id, revoked, "All refresh tokens revoked");
        Ok(revoked)
    }
}
