//! Locations, membership, and invitations.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use shelfhub_auth::LocationAccess;
use shelfhub_core::error::AppError;
use shelfhub_database::store::{LocationStore, UserStore};
use shelfhub_entity::location::{
    CreateLocation, Invitation, Location, LocationInvite, LocationMember, Membership,
    UserLocation,
};

use crate::context::RequestContext;

/// Location lifecycle plus the owner / member / invited workflows.
#[derive(Debug, Clone)]
pub struct LocationService {
    store: Arc<dyn LocationStore>,
    users: Arc<dyn UserStore>,
    access: Arc<LocationAccess>,
}

impl LocationService {
    /// Creates a new location service.
    pub fn new(
        store: Arc<dyn LocationStore>,
        users: Arc<dyn UserStore>,
        access: Arc<LocationAccess>,
    ) -> Self {
        Self {
            store,
            users,
            access,
        }
    }

    /// Creates a location owned by the caller and adds the caller as its
    /// first member.
    ///
    /// The membership write is best-effort: if it fails the location still
    /// exists and the owner can join it later through the owner gate.
    pub async fn create(&self, ctx: &RequestContext, name: &str) -> Result<Location, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Location name is required"));
        }

        let location = self
            .store
            .create_location(&CreateLocation {
                name: name.to_string(),
                owner_id: ctx.user_id,
            })
            .await?;

        if let Err(e) = self
            .store
            .add_location_member(location.id, ctx.user_id)
            .await
        {
            warn!(
                location_id = %location.id,
                owner_id = %ctx.user_id,
                error = %e,
                "Failed to add owner as first member"
            );
        }

        info!(location_id = %location.id, owner_id = %ctx.user_id, "Location created");
        Ok(location)
    }

    /// Fetches a location the caller is a member of.
    pub async fn get(&self, ctx: &RequestContext, location_id: Uuid) -> Result<Location, AppError> {
        self.access
            .authorize_member(location_id, ctx.user_id)
            .await?;
        self.access.location(location_id).await
    }

    /// Locations the caller is a member of.
    pub async fn list_joined(&self, ctx: &RequestContext) -> Result<Vec<UserLocation>, AppError> {
        self.store.list_user_locations(ctx.user_id).await
    }

    /// Locations owned by `owner_id`. Callers may only list their own.
    pub async fn list_owned_by(
        &self,
        ctx: &RequestContext,
        owner_id: Uuid,
    ) -> Result<Vec<Location>, AppError> {
        if !ctx.is_self(owner_id) {
            return Err(AppError::forbidden(
                "User is not authorized to view locations owned by other users",
            ));
        }
        self.store.find_locations_by_owner(owner_id).await
    }

    /// The member list. Owner only.
    pub async fn members(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
    ) -> Result<Vec<LocationMember>, AppError> {
        self.access.authorize_owner(location_id, ctx.user_id).await?;
        self.store.list_location_members(location_id).await
    }

    /// The pending invite list. Owner only.
    pub async fn invites(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
    ) -> Result<Vec<LocationInvite>, AppError> {
        self.access.authorize_owner(location_id, ctx.user_id).await?;
        self.store.list_location_invites(location_id).await
    }

    /// Invites `user_id` to the location. Owner only; re-inviting returns
    /// the existing invitation.
    pub async fn invite(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
        user_id: Uuid,
    ) -> Result<Invitation, AppError> {
        self.access.authorize_owner(location_id, ctx.user_id).await?;

        if self.users.find_user_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }

        let invitation = self.store.add_location_invite(location_id, user_id).await?;
        info!(
            location_id = %location_id,
            invited_user_id = %user_id,
            invited_by = %ctx.user_id,
            "User invited to location"
        );
        Ok(invitation)
    }

    /// Adds a membership.
    ///
    /// The owner may add any user (defaulting to themselves) without an
    /// invitation. Anyone else must hold an invitation and may only join
    /// themselves; their invitation is then deleted. That deletion is a
    /// separate, best-effort write: a failure is logged and the membership
    /// stands.
    pub async fn join(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<Membership, AppError> {
        let target = user_id.unwrap_or(ctx.user_id);
        let caller = self.access.relations(location_id, ctx.user_id).await?;

        if !caller.owner {
            if !ctx.is_self(target) {
                return Err(AppError::forbidden(
                    "Only the location owner can add other users",
                ));
            }
            if !caller.invited {
                return Err(AppError::forbidden(
                    "User has not been invited to this location",
                ));
            }
        }

        let membership = self.store.add_location_member(location_id, target).await?;
        info!(
            location_id = %location_id,
            user_id = %target,
            added_by = %ctx.user_id,
            "User joined location"
        );

        if caller.invited && ctx.is_self(target) {
            self.consume_invitation(location_id, target).await;
        }

        Ok(membership)
    }

    /// Withdraws an invitation. Allowed for the owner and for the invited
    /// user themselves.
    pub async fn remove_invite(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let caller = self.access.relations(location_id, ctx.user_id).await?;
        if !caller.owner {
            if !ctx.is_self(user_id) {
                return Err(AppError::forbidden(
                    "Only the owner or the invited user can remove an invitation",
                ));
            }
            if !caller.invited {
                return Err(AppError::forbidden(
                    "User has not been invited to this location",
                ));
            }
        }

        if !self.store.remove_location_invite(location_id, user_id).await? {
            return Err(AppError::not_found("Invitation not found"));
        }
        info!(
            location_id = %location_id,
            user_id = %user_id,
            removed_by = %ctx.user_id,
            "Location invitation removed"
        );
        Ok(())
    }

    /// Removes a membership. Allowed for the owner and for the member
    /// themselves (leaving the location).
    pub async fn remove_member(
        &self,
        ctx: &RequestContext,
        location_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let caller = self.access.relations(location_id, ctx.user_id).await?;
        if !caller.owner {
            if !ctx.is_self(user_id) {
                return Err(AppError::forbidden(
                    "Only the owner or the member themselves can remove a member",
                ));
            }
            if !caller.member {
                return Err(AppError::forbidden("User is not a member of this location"));
            }
        }

        if !self.store.remove_location_member(location_id, user_id).await? {
            return Err(AppError::not_found("Membership not found"));
        }
        info!(
            location_id = %location_id,
            user_id = %user_id,
            removed_by = %ctx.user_id,
            "Location member removed"
        );
        Ok(())
    }

    async fn consume_invitation(&self, location_id: Uuid, user_id: Uuid) {
        match self.store.remove_location_invite(location_id, user_id).await {
            Ok(true) => debug!(location_id = %location_id, user_id = %user_id, "Invitation consumed"),
            Ok(false) => debug!(
                location_id = %location_id,
                user_id = %user_id,
                "Invitation already gone"
            ),
            Err(e) => warn!(
                location_id = %location_id,
                user_id = %user_id,
                error = %e,
                "Failed to delete consumed invitation"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use shelfhub_core::error::ErrorKind;
    use shelfhub_core::result::AppResult;
    use shelfhub_database::MemoryStore;
    use shelfhub_entity::location::{UserInvite, UserLocation};
    use shelfhub_entity::user::{CreateUser, User};

    use super::*;

    struct Fixture {
        store: MemoryStore,
        service: LocationService,
    }

    impl Fixture {
        fn new() -> Self {
            let store = MemoryStore::new();
            Self::over(Arc::new(store.clone()), store)
        }

        /// Users live in `store`; locations go through `locations`.
        fn over(locations: Arc<dyn LocationStore>, store: MemoryStore) -> Self {
            let access = Arc::new(LocationAccess::new(Arc::clone(&locations)));
            let service = LocationService::new(locations, Arc::new(store.clone()), access);
            Self { store, service }
        }

        async fn user(&self, name: &str) -> (User, RequestContext) {
            let user = self
                .store
                .create_user(&CreateUser {
                    name: name.into(),
                    email: format!("{name}@example.com"),
                    hashed_password: "hash".into(),
                })
                .await
                .unwrap();
            let ctx = RequestContext::new(user.id);
            (user, ctx)
        }
    }

    #[tokio::test]
    async fn test_create_adds_owner_as_first_member() {
        let fx = Fixture::new();
        let (owner, ctx) = fx.user("owner").await;

        let location = fx.service.create(&ctx, "  Den  ").await.unwrap();
        assert_eq!(location.name, "Den");
        assert_eq!(location.owner_id, owner.id);

        let members = fx.service.members(&ctx, location.id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].user_id, owner.id);
        fx.service.get(&ctx, location.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let fx = Fixture::new();
        let (_, ctx) = fx.user("owner").await;

        let err = fx.service.create(&ctx, "   ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_invite_then_join_consumes_invitation() {
        let fx = Fixture::new();
        let (_, owner_ctx) = fx.user("owner").await;
        let (guest, guest_ctx) = fx.user("guest").await;
        let location = fx.service.create(&owner_ctx, "Attic").await.unwrap();

        let err = fx.service.get(&guest_ctx, location.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        fx.service
            .invite(&owner_ctx, location.id, guest.id)
            .await
            .unwrap();
        let membership = fx.service.join(&guest_ctx, location.id, None).await.unwrap();
        assert_eq!(membership.user_id, guest.id);

        assert!(fx.service.invites(&owner_ctx, location.id).await.unwrap().is_empty());
        assert_eq!(fx.service.members(&owner_ctx, location.id).await.unwrap().len(), 2);
        fx.service.get(&guest_ctx, location.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_join_without_invitation_is_forbidden() {
        let fx = Fixture::new();
        let (_, owner_ctx) = fx.user("owner").await;
        let (_, stranger_ctx) = fx.user("stranger").await;
        let location = fx.service.create(&owner_ctx, "Garage").await.unwrap();

        let err = fx
            .service
            .join(&stranger_ctx, location.id, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_invited_user_cannot_join_someone_else() {
        let fx = Fixture::new();
        let (_, owner_ctx) = fx.user("owner").await;
        let (guest, guest_ctx) = fx.user("guest").await;
        let (friend, _) = fx.user("friend").await;
        let location = fx.service.create(&owner_ctx, "Garage").await.unwrap();
        fx.service
            .invite(&owner_ctx, location.id, guest.id)
            .await
            .unwrap();

        let err = fx
            .service
            .join(&guest_ctx, location.id, Some(friend.id))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(fx.service.invites(&owner_ctx, location.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_owner_adds_member_directly_without_touching_invites() {
        let fx = Fixture::new();
        let (_, owner_ctx) = fx.user("owner").await;
        let (guest, _) = fx.user("guest").await;
        let location = fx.service.create(&owner_ctx, "Shed").await.unwrap();
        fx.service
            .invite(&owner_ctx, location.id, guest.id)
            .await
            .unwrap();

        fx.service
            .join(&owner_ctx, location.id, Some(guest.id))
            .await
            .unwrap();

        assert_eq!(fx.service.members(&owner_ctx, location.id).await.unwrap().len(), 2);
        assert_eq!(fx.service.invites(&owner_ctx, location.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invite_is_owner_only_and_requires_known_user() {
        let fx = Fixture::new();
        let (_, owner_ctx) = fx.user("owner").await;
        let (member, member_ctx) = fx.user("member").await;
        let location = fx.service.create(&owner_ctx, "Loft").await.unwrap();
        fx.service
            .join(&owner_ctx, location.id, Some(member.id))
            .await
            .unwrap();

        let err = fx
            .service
            .invite(&member_ctx, location.id, member.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let err = fx
            .service
            .invite(&owner_ctx, location.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_reinvite_keeps_single_invitation() {
        let fx = Fixture::new();
        let (_, owner_ctx) = fx.user("owner").await;
        let (guest, _) = fx.user("guest").await;
        let location = fx.service.create(&owner_ctx, "Loft").await.unwrap();

        let first = fx
            .service
            .invite(&owner_ctx, location.id, guest.id)
            .await
            .unwrap();
        let second = fx
            .service
            .invite(&owner_ctx, location.id, guest.id)
            .await
            .unwrap();

        assert_eq!(first.invited_at, second.invited_at);
        assert_eq!(fx.service.invites(&owner_ctx, location.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_member_may_leave_but_not_remove_others() {
        let fx = Fixture::new();
        let (owner, owner_ctx) = fx.user("owner").await;
        let (member, member_ctx) = fx.user("member").await;
        let location = fx.service.create(&owner_ctx, "Study").await.unwrap();
        fx.service
            .join(&owner_ctx, location.id, Some(member.id))
            .await
            .unwrap();

        let err = fx
            .service
            .remove_member(&member_ctx, location.id, owner.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        fx.service
            .remove_member(&member_ctx, location.id, member.id)
            .await
            .unwrap();
        let err = fx.service.get(&member_ctx, location.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_owner_removing_absent_member_is_not_found() {
        let fx = Fixture::new();
        let (_, owner_ctx) = fx.user("owner").await;
        let (stranger, _) = fx.user("stranger").await;
        let location = fx.service.create(&owner_ctx, "Study").await.unwrap();

        let err = fx
            .service
            .remove_member(&owner_ctx, location.id, stranger.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_invited_user_may_decline() {
        let fx = Fixture::new();
        let (_, owner_ctx) = fx.user("owner").await;
        let (guest, guest_ctx) = fx.user("guest").await;
        let (_, stranger_ctx) = fx.user("stranger").await;
        let location = fx.service.create(&owner_ctx, "Hall").await.unwrap();
        fx.service
            .invite(&owner_ctx, location.id, guest.id)
            .await
            .unwrap();

        let err = fx
            .service
            .remove_invite(&stranger_ctx, location.id, guest.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        fx.service
            .remove_invite(&guest_ctx, location.id, guest.id)
            .await
            .unwrap();
        let err = fx
            .service
            .join(&guest_ctx, location.id, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_unknown_location_is_not_found() {
        let fx = Fixture::new();
        let (_, ctx) = fx.user("owner").await;

        let err = fx.service.members(&ctx, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = fx.service.join(&ctx, Uuid::new_v4(), None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = fx
            .service
            .remove_member(&ctx, Uuid::new_v4(), ctx.user_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_owned_listing_is_self_only() {
        let fx = Fixture::new();
        let (owner, owner_ctx) = fx.user("owner").await;
        let (_, other_ctx) = fx.user("other").await;
        fx.service.create(&owner_ctx, "One").await.unwrap();
        fx.service.create(&owner_ctx, "Two").await.unwrap();

        assert_eq!(
            fx.service.list_owned_by(&owner_ctx, owner.id).await.unwrap().len(),
            2
        );
        assert_eq!(fx.service.list_joined(&owner_ctx).await.unwrap().len(), 2);
        let err = fx
            .service
            .list_owned_by(&other_ctx, owner.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    /// Delegates to memory but cannot delete invitations.
    #[derive(Debug)]
    struct StickyInvites(MemoryStore);

    #[async_trait]
    impl LocationStore for StickyInvites {
        async fn create_location(&self, data: &CreateLocation) -> AppResult<Location> {
            self.0.create_location(data).await
        }

        async fn find_location(&self, id: Uuid) -> AppResult<Option<Location>> {
            self.0.find_location(id).await
        }

        async fn find_locations_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Location>> {
            self.0.find_locations_by_owner(owner_id).await
        }

        async fn list_location_members(&self, location_id: Uuid) -> AppResult<Vec<LocationMember>> {
            self.0.list_location_members(location_id).await
        }

        async fn list_location_invites(&self, location_id: Uuid) -> AppResult<Vec<LocationInvite>> {
            self.0.list_location_invites(location_id).await
        }

        async fn add_location_member(
            &self,
            location_id: Uuid,
            user_id: Uuid,
        ) -> AppResult<Membership> {
            self.0.add_location_member(location_id, user_id).await
        }

        async fn remove_location_member(&self, location_id: Uuid, user_id: Uuid) -> AppResult<bool> {
            self.0.remove_location_member(location_id, user_id).await
        }

        async fn add_location_invite(
            &self,
            location_id: Uuid,
            user_id: Uuid,
        ) -> AppResult<Invitation> {
            self.0.add_location_invite(location_id, user_id).await
        }

        async fn remove_location_invite(&self, _: Uuid, _: Uuid) -> AppResult<bool> {
            Err(AppError::database("connection reset"))
        }

        async fn list_user_locations(&self, user_id: Uuid) -> AppResult<Vec<UserLocation>> {
            self.0.list_user_locations(user_id).await
        }

        async fn list_user_invites(&self, user_id: Uuid) -> AppResult<Vec<UserInvite>> {
            self.0.list_user_invites(user_id).await
        }
    }

    #[tokio::test]
    async fn test_join_survives_failed_invitation_cleanup() {
        let store = MemoryStore::new();
        let fx = Fixture::over(Arc::new(StickyInvites(store.clone())), store);
        let (_, owner_ctx) = fx.user("owner").await;
        let (guest, guest_ctx) = fx.user("guest").await;
        let location = fx.service.create(&owner_ctx, "Cellar").await.unwrap();

        fx.service
            .invite(&owner_ctx, location.id, guest.id)
            .await
            .unwrap();
        let membership = fx.service.join(&guest_ctx, location.id, None).await.unwrap();
        assert_eq!(membership.user_id, guest.id);

        let access = LocationAccess::new(Arc::new(fx.store.clone()));
        assert!(access.is_member(location.id, guest.id).await.unwrap());
        assert!(access.is_invited(location.id, guest.id).await.unwrap());
    }
}
