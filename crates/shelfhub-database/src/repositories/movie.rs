//! Movie repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use shelfhub_core::error::{AppError, ErrorKind};
use shelfhub_core::result::AppResult;
use shelfhub_entity::catalog::{Movie, NewMovie};

use super::catalog::CatalogRepository;

/// Repository for movies.
#[derive(Debug, Clone)]
pub struct MovieRepository {
    pool: PgPool,
}

impl MovieRepository {
    /// Create a new movie repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for MovieRepository {
    type Item = Movie;
    type Draft = NewMovie;

    const TABLE: &'static str = "movies";
    const KIND: &'static str = "movie";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert(&self, draft: &NewMovie) -> AppResult<Movie> {
        sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (title, genre, actors, writer, director, release_date, barcode, format, shelf_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&draft.title)
        .bind(&draft.genre)
        .bind(&draft.actors)
        .bind(&draft.writer)
        .bind(&draft.director)
        .bind(draft.release_date)
        .bind(&draft.barcode)
        .bind(&draft.format)
        .bind(draft.shelf_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create movie", e))
    }

    async fn replace(&self, id: Uuid, draft: &NewMovie) -> AppResult<Option<Movie>> {
        sqlx::query_as::<_, Movie>(
            "UPDATE movies SET title = $2, genre = $3, actors = $4, writer = $5, director = $6, \
                               release_date = $7, barcode = $8, format = $9, shelf_id = $10, \
                               updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.genre)
        .bind(&draft.actors)
        .bind(&draft.writer)
        .bind(&draft.director)
        .bind(draft.release_date)
        .bind(&draft.barcode)
        .bind(&draft.format)
        .bind(draft.shelf_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update movie", e))
    }
}
