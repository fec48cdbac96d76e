//! Location membership rows and views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's standing membership in a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Membership {
    /// The location joined.
    pub location_id: Uuid,
    /// The member.
    pub user_id: Uuid,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}

/// A member of a location, joined with their user row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LocationMember {
    pub location_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

/// A location the user belongs to, as seen from the user's side.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserLocation {
    pub user_id: Uuid,
    pub location_id: Uuid,
    pub location_name: String,
    pub owner_id: Uuid,
    pub joined_at: DateTime<Utc>,
}
