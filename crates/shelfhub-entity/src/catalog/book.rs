//! Book entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::CatalogDraft;

/// A book on a shelf.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub barcode: String,
    pub publication_date: DateTime<Utc>,
    pub shelf_id: Uuid,
}

/// Fields of a book as submitted by a client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBook {
    pub shelf_id: Uuid,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub barcode: String,
    pub publication_date: DateTime<Utc>,
}

impl CatalogDraft for NewBook {
    fn shelf_id(&self) -> Uuid {
        self.shelf_id
    }
}
