//! Music repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use shelfhub_core::error::{AppError, ErrorKind};
use shelfhub_core::result::AppResult;
use shelfhub_entity::catalog::{Music, NewMusic};

use super::catalog::CatalogRepository;

/// Repository for music releases.
#[derive(Debug, Clone)]
pub struct MusicRepository {
    pool: PgPool,
}

impl MusicRepository {
    /// Create a new music repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for MusicRepository {
    type Item = Music;
    type Draft = NewMusic;

    const TABLE: &'static str = "music";
    const KIND: &'static str = "music";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert(&self, draft: &NewMusic) -> AppResult<Music> {
        sqlx::query_as::<_, Music>(
            "INSERT INTO music (title, artist, genre, barcode, format, release_date, shelf_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&draft.title)
        .bind(&draft.artist)
        .bind(&draft.genre)
        .bind(&draft.barcode)
        .bind(&draft.format)
        .bind(draft.release_date)
        .bind(draft.shelf_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create music", e))
    }

    async fn replace(&self, id: Uuid, draft: &NewMusic) -> AppResult<Option<Music>> {
        sqlx::query_as::<_, Music>(
            "UPDATE music SET title = $2, artist = $3, genre = $4, barcode = $5, format = $6, \
                              release_date = $7, shelf_id = $8, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.artist)
        .bind(&draft.genre)
        .bind(&draft.barcode)
        .bind(&draft.format)
        .bind(draft.release_date)
        .bind(draft.shelf_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update music", e))
    }
}
