//! Shelf repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use shelfhub_core::error::{AppError, ErrorKind};
use shelfhub_core::result::AppResult;
use shelfhub_entity::catalog::{NewShelf, Shelf};

use crate::store::ShelfStore;

/// Repository for shelves.
#[derive(Debug, Clone)]
pub struct ShelfRepository {
    pool: PgPool,
}

impl ShelfRepository {
    /// Create a new shelf repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShelfStore for ShelfRepository {
    async fn create_shelf(&self, data: &NewShelf) -> AppResult<Shelf> {
        sqlx::query_as::<_, Shelf>("INSERT INTO shelves (name, case_id) VALUES ($1, $2) RETURNING *")
            .bind(&data.name)
            .bind(data.case_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::not_found(format!("Case {} not found", data.case_id))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create shelf", e),
            })
    }

    async fn find_shelf(&self, id: Uuid) -> AppResult<Option<Shelf>> {
        sqlx::query_as::<_, Shelf>("SELECT * FROM shelves WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find shelf", e))
    }

    async fn list_shelves_by_case(&self, case_id: Uuid) -> AppResult<Vec<Shelf>> {
        sqlx::query_as::<_, Shelf>("SELECT * FROM shelves WHERE case_id = $1 ORDER BY name")
            .bind(case_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shelves", e))
    }

    async fn rename_shelf(&self, id: Uuid, name: &str) -> AppResult<Option<Shelf>> {
        sqlx::query_as::<_, Shelf>(
            "UPDATE shelves SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename shelf", e))
    }

    async fn delete_shelf(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM shelves WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete shelf", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_shelf_location(&self, id: Uuid) -> AppResult<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT c.location_id FROM shelves s JOIN cases c ON c.id = s.case_id WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to resolve shelf location", e)
        })
    }
}
