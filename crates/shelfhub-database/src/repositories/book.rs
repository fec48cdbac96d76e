//! Book repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use shelfhub_core::error::{AppError, ErrorKind};
use shelfhub_core::result::AppResult;
use shelfhub_entity::catalog::{Book, NewBook};

use super::catalog::CatalogRepository;

/// Repository for books.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// Create a new book repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for BookRepository {
    type Item = Book;
    type Draft = NewBook;

    const TABLE: &'static str = "books";
    const KIND: &'static str = "book";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert(&self, draft: &NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author, genre, barcode, publication_date, shelf_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.genre)
        .bind(&draft.barcode)
        .bind(draft.publication_date)
        .bind(draft.shelf_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create book", e))
    }

    async fn replace(&self, id: Uuid, draft: &NewBook) -> AppResult<Option<Book>> {
        sqlx::query_as::<_, Book>(
            "UPDATE books SET title = $2, author = $3, genre = $4, barcode = $5, \
                              publication_date = $6, shelf_id = $7, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.genre)
        .bind(&draft.barcode)
        .bind(draft.publication_date)
        .bind(draft.shelf_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update book", e))
    }
}
