//! Show entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::CatalogDraft;

/// One season of a television show on a shelf.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub season: i32,
    pub genre: String,
    pub actors: String,
    pub writer: String,
    pub director: String,
    pub release_date: DateTime<Utc>,
    pub barcode: String,
    pub shelf_id: Uuid,
}

/// Fields of a show as submitted by a client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewShow {
    pub shelf_id: Uuid,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(range(min = 0, message = "season must not be negative"))]
    #[serde(default)]
    pub season: i32,
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
}

impl CatalogDraft for NewShow {
    fn shelf_id(&self) -> Uuid {
        self.shelf_id
    }
}
