//! Show repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use shelfhub_core::error::{AppError, ErrorKind};
use shelfhub_core::result::AppResult;
use shelfhub_entity::catalog::{NewShow, Show};

use super::catalog::CatalogRepository;

/// Repository for television shows.
#[derive(Debug, Clone)]
pub struct ShowRepository {
    pool: PgPool,
}

impl ShowRepository {
    /// Create a new show repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for ShowRepository {
    type Item = Show;
    type Draft = NewShow;

    const TABLE: &'static str = "shows";
    const KIND: &'static str = "show";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert(&self, draft: &NewShow) -> AppResult<Show> {
        sqlx::query_as::<_, Show>(
            "INSERT INTO shows (title, season, genre, actors, writer, director, release_date, barcode, shelf_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&draft.title)
        .bind(draft.season)
        .bind(&draft.genre)
        .bind(&draft.actors)
        .bind(&draft.writer)
        .bind(&draft.director)
        .bind(draft.release_date)
        .bind(&draft.barcode)
        .bind(draft.shelf_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create show", e))
    }

    async fn replace(&self, id: Uuid, draft: &NewShow) -> AppResult<Option<Show>> {
        sqlx::query_as::<_, Show>(
            "UPDATE shows SET title = $2, season = $3, genre = $4, actors = $5, writer = $6, \
                              director = $7, release_date = $8, barcode = $9, shelf_id = $10, \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&draft.title)
        .bind(draft.season)
        .bind(&draft.genre)
        .bind(&draft.actors)
        .bind(&draft.writer)
        .bind(&draft.director)
        .bind(draft.release_date)
        .bind(&draft.barcode)
        .bind(draft.shelf_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update show", e))
    }
}
