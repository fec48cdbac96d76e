//! Refresh token repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use shelfhub_core::error::{AppError, ErrorKind};
use shelfhub_core::result::AppResult;
use shelfhub_entity::session::RefreshToken;

use crate::store::RefreshTokenStore;

/// Repository for persisted refresh tokens.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for RefreshTokenRepository {
    async fn create_refresh_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens (token, user_id, expires_at) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create refresh token", e)
        })
    }

    async fn find_refresh_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>("SELECT * FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find refresh token", e)
            })
    }

    async fn revoke_refresh_token(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens \
             SET updated_at = CASE WHEN revoked_at IS NULL THEN NOW() ELSE updated_at END, \
                 revoked_at = COALESCE(revoked_at, NOW()) \
             WHERE token = $1",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh token", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all_refresh_tokens(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = NOW(), updated_at = NOW() \
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh tokens", e)
        })?;
        Ok(result.rows_affected())
    }
}
