//! Store traits consumed by the auth and service layers.
//!
//! Each trait is implemented by a Postgres repository and by
//! [`MemoryStore`](crate::memory::MemoryStore). Implementations only move
//! rows; every authorization decision is made by the callers.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use shelfhub_core::result::AppResult;
use shelfhub_entity::catalog::{Case, NewCase, NewShelf, Shelf};
use shelfhub_entity::location::{
    CreateLocation, Invitation, Location, LocationInvite, LocationMember, Membership, UserInvite,
    UserLocation,
};
use shelfhub_entity::session::RefreshToken;
use shelfhub_entity::user::{CreateUser, UpdateUser, User};

/// Identity lookups and user maintenance.
#[async_trait]
pub trait UserStore: Send + Sync + Debug + 'static {
    /// Find a user by primary key.
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List all users, oldest first.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Create a user. A taken email is a `Conflict`.
    async fn create_user(&self, data: &CreateUser) -> AppResult<User>;

    /// Replace a user's email and password hash. A missing user is `NotFound`.
    async fn update_user(&self, data: &UpdateUser) -> AppResult<User>;

    /// Delete every user, cascading to all owned data. Returns the count removed.
    async fn delete_all_users(&self) -> AppResult<u64>;
}

/// Location ownership, membership, and invitation relations.
#[async_trait]
pub trait LocationStore: Send + Sync + Debug + 'static {
    /// Create a location. Does not add any membership.
    async fn create_location(&self, data: &CreateLocation) -> AppResult<Location>;

    /// Find a location by primary key.
    async fn find_location(&self, id: Uuid) -> AppResult<Option<Location>>;

    /// All locations owned by `owner_id`.
    async fn find_locations_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Location>>;

    /// Members of a location, in join order.
    async fn list_location_members(&self, location_id: Uuid) -> AppResult<Vec<LocationMember>>;

    /// Pending invitations of a location, in invitation order.
    async fn list_location_invites(&self, location_id: Uuid) -> AppResult<Vec<LocationInvite>>;

    /// Add a membership. Adding an existing member returns the existing row.
    async fn add_location_member(&self, location_id: Uuid, user_id: Uuid)
    -> AppResult<Membership>;

    /// Remove a membership. Returns `false` when there was none.
    async fn remove_location_member(&self, location_id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Add an invitation. Re-inviting returns the existing row.
    async fn add_location_invite(&self, location_id: Uuid, user_id: Uuid)
    -> AppResult<Invitation>;

    /// Remove an invitation. Returns `false` when there was none.
    async fn remove_location_invite(&self, location_id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Locations `user_id` is a member of.
    async fn list_user_locations(&self, user_id: Uuid) -> AppResult<Vec<UserLocation>>;

    /// Pending invitations addressed to `user_id`.
    async fn list_user_invites(&self, user_id: Uuid) -> AppResult<Vec<UserInvite>>;
}

/// Refresh token persistence. Tokens are revoked, never deleted.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + Debug + 'static {
    /// Persist a freshly issued refresh token.
    async fn create_refresh_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken>;

    /// Look up a token by value regardless of its validity.
    async fn find_refresh_token(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// Stamp `revoked_at` on one token, keeping an earlier stamp if present.
    /// Returns `false` when no such token exists.
    async fn revoke_refresh_token(&self, token: &str) -> AppResult<bool>;

    /// Revoke every unrevoked token of `user_id`. Returns how many changed.
    async fn revoke_all_refresh_tokens(&self, user_id: Uuid) -> AppResult<u64>;
}

/// Cases inside locations.
#[async_trait]
pub trait CaseStore: Send + Sync + Debug + 'static {
    /// Insert a case. An unknown location is `NotFound`.
    async fn create_case(&self, data: &NewCase) -> AppResult<Case>;

    /// Find a case by primary key.
    async fn find_case(&self, id: Uuid) -> AppResult<Option<Case>>;

    /// Cases of one location, by name.
    async fn list_cases_by_location(&self, location_id: Uuid) -> AppResult<Vec<Case>>;

    /// Rename a case. Returns `None` when it does not exist.
    async fn rename_case(&self, id: Uuid, name: &str) -> AppResult<Option<Case>>;

    /// Delete a case and everything on its shelves. Returns `false` when absent.
    async fn delete_case(&self, id: Uuid) -> AppResult<bool>;
}

/// Shelves inside cases.
#[async_trait]
pub trait ShelfStore: Send + Sync + Debug + 'static {
    /// Insert a shelf. An unknown case is `NotFound`.
    async fn create_shelf(&self, data: &NewShelf) -> AppResult<Shelf>;

    /// Find a shelf by primary key.
    async fn find_shelf(&self, id: Uuid) -> AppResult<Option<Shelf>>;

    /// Shelves of one case, by name.
    async fn list_shelves_by_case(&self, case_id: Uuid) -> AppResult<Vec<Shelf>>;

    /// Rename a shelf. Returns `None` when it does not exist.
    async fn rename_shelf(&self, id: Uuid, name: &str) -> AppResult<Option<Shelf>>;

    /// Delete a shelf and its items. Returns `false` when absent.
    async fn delete_shelf(&self, id: Uuid) -> AppResult<bool>;

    /// The location a shelf belongs to, through its case.
    async fn find_shelf_location(&self, id: Uuid) -> AppResult<Option<Uuid>>;
}
