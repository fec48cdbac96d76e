//! Location, membership, and invitation repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use shelfhub_core::error::{AppError, ErrorKind};
use shelfhub_core::result::AppResult;
use shelfhub_entity::location::{
    CreateLocation, Invitation, Location, LocationInvite, LocationMember, Membership, UserInvite,
    UserLocation,
};

use crate::store::LocationStore;

/// Repository for locations and the user relations attached to them.
#[derive(Debug, Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    /// Create a new location repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Foreign key failures on relation writes mean the location or user is gone.
fn map_relation_error(e: sqlx::Error, action: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::not_found("Location or user not found")
        }
        _ => AppError::with_source(ErrorKind::Database, action, e),
    }
}

#[async_trait]
impl LocationStore for LocationRepository {
    async fn create_location(&self, data: &CreateLocation) -> AppResult<Location> {
        sqlx::query_as::<_, Location>(
            "INSERT INTO locations (name, owner_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_relation_error(e, "Failed to create location"))
    }

    async fn find_location(&self, id: Uuid) -> AppResult<Option<Location>> {
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find location", e))
    }

    async fn find_locations_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Location>> {
        sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE owner_id = $1 ORDER BY created_at",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list locations by owner", e)
        })
    }

    async fn list_location_members(&self, location_id: Uuid) -> AppResult<Vec<LocationMember>> {
        sqlx::query_as::<_, LocationMember>(
            "SELECT lu.location_id, lu.user_id, u.name, u.email, lu.joined_at \
             FROM location_users lu \
             JOIN users u ON u.id = lu.user_id \
             WHERE lu.location_id = $1 \
             ORDER BY lu.joined_at",
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list location members", e)
        })
    }

    async fn list_location_invites(&self, location_id: Uuid) -> AppResult<Vec<LocationInvite>> {
        sqlx::query_as::<_, LocationInvite>(
            "SELECT li.location_id, li.user_id, u.name, u.email, li.invited_at \
             FROM location_invites li \
             JOIN users u ON u.id = li.user_id \
             WHERE li.location_id = $1 \
             ORDER BY li.invited_at",
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list location invites", e)
        })
    }

    async fn add_location_member(
        &self,
        location_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Membership> {
        sqlx::query_as::<_, Membership>(
            "INSERT INTO location_users (location_id, user_id) VALUES ($1, $2) \
             ON CONFLICT (location_id, user_id) \
             DO UPDATE SET joined_at = location_users.joined_at \
             RETURNING *",
        )
        .bind(location_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_relation_error(e, "Failed to add location member"))
    }

    async fn remove_location_member(&self, location_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM location_users WHERE location_id = $1 AND user_id = $2")
                .bind(location_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to remove location member",
                        e,
                    )
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_location_invite(
        &self,
        location_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Invitation> {
        sqlx::query_as::<_, Invitation>(
            "INSERT INTO location_invites (location_id, user_id) VALUES ($1, $2) \
             ON CONFLICT (location_id, user_id) \
             DO UPDATE SET invited_at = location_invites.invited_at \
             RETURNING *",
        )
        .bind(location_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_relation_error(e, "Failed to add location invite"))
    }

    async fn remove_location_invite(&self, location_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM location_invites WHERE location_id = $1 AND user_id = $2")
                .bind(location_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to remove location invite",
                        e,
                    )
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_user_locations(&self, user_id: Uuid) -> AppResult<Vec<UserLocation>> {
        sqlx::query_as::<_, UserLocation>(
            "SELECT lu.user_id, l.id AS location_id, l.name AS location_name, l.owner_id, lu.joined_at \
             FROM location_users lu \
             JOIN locations l ON l.id = lu.location_id \
             WHERE lu.user_id = $1 \
             ORDER BY lu.joined_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user locations", e)
        })
    }

    async fn list_user_invites(&self, user_id: Uuid) -> AppResult<Vec<UserInvite>> {
        sqlx::query_as::<_, UserInvite>(
            "SELECT li.user_id, l.id AS location_id, l.name AS location_name, l.owner_id, li.invited_at \
             FROM location_invites li \
             JOIN locations l ON l.id = li.location_id \
             WHERE li.user_id = $1 \
             ORDER BY li.invited_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user invites", e))
    }
}
