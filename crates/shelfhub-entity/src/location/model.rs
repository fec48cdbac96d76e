//! Location entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named collection owned by exactly one user. Ownership never changes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    /// Unique location identifier.
    pub id: Uuid,
    /// When the location was created.
    pub created_at: DateTime<Utc>,
    /// When the location was last updated.
    pub updated_at: DateTime<Utc>,
    /// Display name.
    pub name: String,
    /// The owning user.
    pub owner_id: Uuid,
}

impl Location {
    /// Whether `user_id` owns this location.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

/// Data required to create a location.
#[derive(Debug, Clone)]
pub struct CreateLocation {
    /// Display name.
    pub name: String,
    /// The creating user, who becomes owner.
    pub owner_id: Uuid,
}
