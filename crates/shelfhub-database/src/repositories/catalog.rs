//! Shared query surface for catalog item tables.
//!
//! Books, movies, music, and shows live in tables with the same shape
//! around them: each row sits on a shelf, shelves sit in cases, cases sit
//! in a location. Everything except insert and replace is written once
//! here against [`CatalogRepository::TABLE`].

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shelfhub_core::error::{AppError, ErrorKind};
use shelfhub_core::result::AppResult;
use shelfhub_entity::catalog::CatalogDraft;

/// A repository for one catalog item table.
#[async_trait]
pub trait CatalogRepository: Send + Sync + std::fmt::Debug + 'static {
    /// The stored row.
    type Item: for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static;
    /// The client-submitted fields for create and replace.
    type Draft: CatalogDraft + DeserializeOwned + Send + Sync + 'static;

    /// Table name, also the plural used in routes.
    const TABLE: &'static str;
    /// Singular noun used in messages and barcode routes.
    const KIND: &'static str;

    /// The pool queries run against.
    fn pool(&self) -> &PgPool;

    /// Insert a new row.
    async fn insert(&self, draft: &Self::Draft) -> AppResult<Self::Item>;

    /// Replace every client-owned column of an existing row.
    async fn replace(&self, id: Uuid, draft: &Self::Draft) -> AppResult<Option<Self::Item>>;

    /// Find an item by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Self::Item>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", Self::TABLE);
        sqlx::query_as::<_, Self::Item>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to find {}", Self::KIND),
                    e,
                )
            })
    }

    /// Delete an item. Returns `false` when it did not exist.
    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", Self::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to delete {}", Self::KIND),
                    e,
                )
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Items on one shelf.
    async fn list_by_shelf(&self, shelf_id: Uuid) -> AppResult<Vec<Self::Item>> {
        let sql = format!(
            "SELECT * FROM {} WHERE shelf_id = $1 ORDER BY title",
            Self::TABLE
        );
        sqlx::query_as::<_, Self::Item>(&sql)
            .bind(shelf_id)
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to list {} by shelf", Self::TABLE),
                    e,
                )
            })
    }

    /// Items anywhere in one location.
    async fn list_by_location(&self, location_id: Uuid) -> AppResult<Vec<Self::Item>> {
        let sql = format!(
            "SELECT i.* FROM {} i \
             JOIN shelves s ON s.id = i.shelf_id \
             JOIN cases c ON c.id = s.case_id \
             WHERE c.location_id = $1 \
             ORDER BY i.title",
            Self::TABLE
        );
        sqlx::query_as::<_, Self::Item>(&sql)
            .bind(location_id)
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to list {} by location", Self::TABLE),
                    e,
                )
            })
    }

    /// Full-text search within one location, best match first.
    async fn search(&self, location_id: Uuid, query: &str) -> AppResult<Vec<Self::Item>> {
        let sql = format!(
            "SELECT i.* FROM {} i \
             JOIN shelves s ON s.id = i.shelf_id \
             JOIN cases c ON c.id = s.case_id \
             WHERE c.location_id = $1 \
               AND i.search @@ websearch_to_tsquery('english', $2) \
             ORDER BY ts_rank(i.search, websearch_to_tsquery('english', $2)) DESC, i.title",
            Self::TABLE
        );
        sqlx::query_as::<_, Self::Item>(&sql)
            .bind(location_id)
            .bind(query)
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to search {}", Self::TABLE),
                    e,
                )
            })
    }

    /// Items with `barcode` in any location `user_id` is a member of.
    async fn find_by_barcode_for_member(
        &self,
        barcode: &str,
        user_id: Uuid,
    ) -> AppResult<Vec<Self::Item>> {
        let sql = format!(
            "SELECT i.* FROM {} i \
             JOIN shelves s ON s.id = i.shelf_id \
             JOIN cases c ON c.id = s.case_id \
             JOIN location_users lu ON lu.location_id = c.location_id \
             WHERE i.barcode = $1 AND lu.user_id = $2 \
             ORDER BY i.created_at",
            Self::TABLE
        );
        sqlx::query_as::<_, Self::Item>(&sql)
            .bind(barcode)
            .bind(user_id)
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to find {} by barcode", Self::KIND),
                    e,
                )
            })
    }

    /// The location an item belongs to, through its shelf and case.
    async fn location_of(&self, id: Uuid) -> AppResult<Option<Uuid>> {
        let sql = format!(
            "SELECT c.location_id FROM {} i \
             JOIN shelves s ON s.id = i.shelf_id \
             JOIN cases c ON c.id = s.case_id \
             WHERE i.id = $1",
            Self::TABLE
        );
        sqlx::query_scalar::<_, Uuid>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to resolve {} location", Self::KIND),
                    e,
                )
            })
    }
}
