//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Display name.
    pub name: String,
    /// Unique login email.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub hashed_password: String,
}

/// Replacement credentials for an existing user.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    /// The user ID to update.
    pub id: Uuid,
    /// New login email.
    pub email: String,
    /// New pre-hashed password.
    pub hashed_password: String,
}
