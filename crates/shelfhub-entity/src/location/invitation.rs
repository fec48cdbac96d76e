//! Pending location invitations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A pending offer for a user to join a location. At most one exists per
/// (location, user) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Invitation {
    /// The location the user is invited to.
    pub location_id: Uuid,
    /// The invited user.
    pub user_id: Uuid,
    /// When the invitation was issued.
    pub invited_at: DateTime<Utc>,
}

/// An invited user of a location, joined with their user row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LocationInvite {
    pub location_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub invited_at: DateTime<Utc>,
}

/// An invitation as seen from the invited user's side.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserInvite {
    pub user_id: Uuid,
    pub location_id: Uuid,
    pub location_name: String,
    pub owner_id: Uuid,
    pub invited_at: DateTime<Utc>,
}
