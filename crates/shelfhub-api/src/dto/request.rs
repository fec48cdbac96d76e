//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "An email address must be provided"))]
    pub email: String,
    #[validate(length(min = 1, message = "A password is required"))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Credential update for the calling user. Omitted fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body for anything that only carries a name (locations, renames).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

/// Invite a user to a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteRequest {
    pub user_id: Uuid,
}

/// Join a location. Without `user_id` the caller joins themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JoinRequest {
    pub user_id: Option<Uuid>,
}

/// `?email=` lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// `?owner_id=` lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerQuery {
    pub owner_id: Uuid,
}

/// Full-text search within one location.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSearchQuery {
    pub location_id: Uuid,
    #[serde(default)]
    pub query: String,
}
