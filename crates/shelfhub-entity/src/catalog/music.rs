//! Music entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::CatalogDraft;

/// A music release on a shelf.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Music {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub barcode: String,
    /// Physical format, e.g. `CD` or `Vinyl`.
    pub format: String,
    pub release_date: DateTime<Utc>,
    pub shelf_id: Uuid,
}

/// Fields of a music release as submitted by a client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMusic {
    pub shelf_id: Uuid,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub format: String,
    pub release_date: DateTime<Utc>,
}

impl CatalogDraft for NewMusic {
    fn shelf_id(&self) -> Uuid {
        self.shelf_id
    }
}
