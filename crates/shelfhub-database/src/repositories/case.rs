//! Case repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use shelfhub_core::error::{AppError, ErrorKind};
use shelfhub_core::result::AppResult;
use shelfhub_entity::catalog::{Case, NewCase};

use crate::store::CaseStore;

/// Repository for cases.
#[derive(Debug, Clone)]
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    /// Create a new case repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaseStore for CaseRepository {
    async fn create_case(&self, data: &NewCase) -> AppResult<Case> {
        sqlx::query_as::<_, Case>("INSERT INTO cases (name, location_id) VALUES ($1, $2) RETURNING *")
            .bind(&data.name)
            .bind(data.location_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::not_found(format!("Location {} not found", data.location_id))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create case", e),
            })
    }

    async fn find_case(&self, id: Uuid) -> AppResult<Option<Case>> {
        sqlx::query_as::<_, Case>("SELECT * FROM cases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find case", e))
    }

    async fn list_cases_by_location(&self, location_id: Uuid) -> AppResult<Vec<Case>> {
        sqlx::query_as::<_, Case>("SELECT * FROM cases WHERE location_id = $1 ORDER BY name")
            .bind(location_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list cases", e))
    }

    async fn rename_case(&self, id: Uuid, name: &str) -> AppResult<Option<Case>> {
        sqlx::query_as::<_, Case>(
            "UPDATE cases SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename case", e))
    }

    async fn delete_case(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cases WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete case", e))?;
        Ok(result.rows_affected() > 0)
    }
}
