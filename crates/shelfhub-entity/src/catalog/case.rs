//! Case entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A physical case inside a location.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Case {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub location_id: Uuid,
}

/// Data required to create a case.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCase {
    pub location_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
}
