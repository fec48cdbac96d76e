//! Relation checks and gates for location-scoped operations.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use shelfhub_core::error::AppError;
use shelfhub_database::store::LocationStore;
use shelfhub_entity::location::Location;

/// The caller's relations to one location, each resolved independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relations {
    /// Caller is the location's owner.
    pub owner: bool,
    /// Caller appears in the location's member list.
    pub member: bool,
    /// Caller appears in the location's invite list.
    pub invited: bool,
}

/// Answers owner / member / invited questions against the location store.
///
/// Ownership does not imply membership: an owner who left (or was never
/// added) fails [`authorize_member`](Self::authorize_member).
#[derive(Debug, Clone)]
pub struct LocationAccess {
    store: Arc<dyn LocationStore>,
}

impl LocationAccess {
    /// Creates a checker over a location store.
    pub fn new(store: Arc<dyn LocationStore>) -> Self {
        Self { store }
    }

    /// Fetches a location or fails with `NotFound`.
    pub async fn location(&self, location_id: Uuid) -> Result<Location, AppError> {
        self.store
            .find_location(location_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Location {location_id} not found")))
    }

    /// Whether `user_id` owns the location. Membership and invite lists are
    /// not consulted.
    pub async fn is_owner(&self, location_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        Ok(self.location(location_id).await?.is_owned_by(user_id))
    }

    /// Whether `user_id` appears in the location's member list.
    pub async fn is_member(&self, location_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let members = self.store.list_location_members(location_id).await?;
        Ok(members.iter().any(|m| m.user_id == user_id))
    }

    /// Whether `user_id` appears in the location's invite list.
    pub async fn is_invited(&self, location_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let invites = self.store.list_location_invites(location_id).await?;
        Ok(invites.iter().any(|i| i.user_id == user_id))
    }

    /// Resolves all three relations. Fails with `NotFound` for an unknown
    /// location.
    pub async fn relations(&self, location_id: Uuid, user_id: Uuid) -> Result<Relations, AppError> {
        let relations = Relations {
            owner: self.is_owner(location_id, user_id).await?,
            member: self.is_member(location_id, user_id).await?,
            invited: self.is_invited(location_id, user_id).await?,
        };
        debug!(
            location_id = %location_id,
            user_id = %user_id,
            owner = relations.owner,
            member = relations.member,
            invited = relations.invited,
            "Resolved location relations"
        );
        Ok(relations)
    }

    /// Succeeds iff `user_id` owns the location.
    pub async fn authorize_owner(&self, location_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if self.is_owner(location_id, user_id).await? {
            Ok(())
        } else {
            Err(AppError::forbidden("Only the location owner can do this"))
        }
    }

    /// Succeeds iff `user_id` is a member of the location.
    pub async fn authorize_member(&self, location_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if self.is_member(location_id, user_id).await? {
            Ok(())
        } else {
            Err(AppError::forbidden("User is not a member of this location"))
        }
    }

    /// Succeeds iff `user_id` has a pending invitation to the location.
    pub async fn authorize_invited(
        &self,
        location_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        if self.is_invited(location_id, user_id).await? {
            Ok(())
        } else {
            Err(AppError::forbidden("User has not been invited to this location"))
        }
    }
}
