//! Movie entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::CatalogDraft;

/// A movie on a shelf.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub genre: String,
    pub actors: String,
    pub writer: String,
    pub director: String,
    pub release_date: DateTime<Utc>,
    pub barcode: String,
    /// Physical format, e.g. `DVD` or `Blu-ray`.
    pub format: String,
    pub shelf_id: Uuid,
}

/// Fields of a movie as submitted by a client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMovie {
    pub shelf_id: Uuid,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub actors: String,
    #[serde(default)]
    pub writer: String,
    #[serde(default)]
    pub director: String,
    pub release_date: DateTime<Utc>,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub format: String,
}

impl CatalogDraft for NewMovie {
    fn shelf_id(&self) -> Uuid {
        self.shelf_id
    }
}
