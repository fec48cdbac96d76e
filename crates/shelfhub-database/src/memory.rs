//! In-memory implementation of the store traits using dashmap.
//!
//! Mirrors the Postgres constraints that matter to callers: unique emails,
//! one membership and one invitation per (location, user) pair, foreign
//! keys on relation and case/shelf writes, and cascading deletes.
//! Catalog items are not held here.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use shelfhub_core::error::AppError;
use shelfhub_core::result::AppResult;
use shelfhub_entity::catalog::{Case, NewCase, NewShelf, Shelf};
use shelfhub_entity::location::{
    CreateLocation, Invitation, Location, LocationInvite, LocationMember, Membership, UserInvite,
    UserLocation,
};
use shelfhub_entity::session::RefreshToken;
use shelfhub_entity::user::{CreateUser, UpdateUser, User};

use crate::store::{CaseStore, LocationStore, RefreshTokenStore, ShelfStore, UserStore};

type PairKey = (Uuid, Uuid);

/// Process-local store backing every store trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<Uuid, User>>,
    locations: Arc<DashMap<Uuid, Location>>,
    /// Keyed by (location_id, user_id).
    members: Arc<DashMap<PairKey, Membership>>,
    /// Keyed by (location_id, user_id).
    invites: Arc<DashMap<PairKey, Invitation>>,
    tokens: Arc<DashMap<String, RefreshToken>>,
    cases: Arc<DashMap<Uuid, Case>>,
    shelves: Arc<DashMap<Uuid, Shelf>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_relation_targets(&self, location_id: Uuid, user_id: Uuid) -> AppResult<()> {
        if !self.locations.contains_key(&location_id) || !self.users.contains_key(&user_id) {
            return Err(AppError::not_found("Location or user not found"));
        }
        Ok(())
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email) && Some(u.id) != except)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .map(|u| u.value().clone()))
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.email.cmp(&b.email)));
        Ok(users)
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        if self.email_taken(&data.email, None) {
            return Err(AppError::conflict("Email already in use"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name: data.name.clone(),
            email: data.email.clone(),
            hashed_password: data.hashed_password.clone(),
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, data: &UpdateUser) -> AppResult<User> {
        if self.email_taken(&data.email, Some(data.id)) {
            return Err(AppError::conflict("Email already in use"));
        }
        let mut entry = self
            .users
            .get_mut(&data.id)
            .ok_or_else(|| AppError::not_found(format!("User {} not found", data.id)))?;
        entry.email = data.email.clone();
        entry.hashed_password = data.hashed_password.clone();
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }

    async fn delete_all_users(&self) -> AppResult<u64> {
        let count = self.users.len() as u64;
        self.tokens.clear();
        self.shelves.clear();
        self.cases.clear();
        self.invites.clear();
        self.members.clear();
        self.locations.clear();
        self.users.clear();
        Ok(count)
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn create_location(&self, data: &CreateLocation) -> AppResult<Location> {
        if !self.users.contains_key(&data.owner_id) {
            return Err(AppError::not_found("Location or user not found"));
        }
        let now = Utc::now();
        let location = Location {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name: data.name.clone(),
            owner_id: data.owner_id,
        };
        self.locations.insert(location.id, location.clone());
        Ok(location)
    }

    async fn find_location(&self, id: Uuid) -> AppResult<Option<Location>> {
        Ok(self.locations.get(&id).map(|l| l.value().clone()))
    }

    async fn find_locations_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Location>> {
        let mut locations: Vec<Location> = self
            .locations
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .map(|l| l.value().clone())
            .collect();
        locations.sort_by_key(|l| l.created_at);
        Ok(locations)
    }

    async fn list_location_members(&self, location_id: Uuid) -> AppResult<Vec<LocationMember>> {
        let mut members: Vec<LocationMember> = self
            .members
            .iter()
            .filter(|m| m.location_id == location_id)
            .filter_map(|m| {
                self.users.get(&m.user_id).map(|u| LocationMember {
                    location_id: m.location_id,
                    user_id: m.user_id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                    joined_at: m.joined_at,
                })
            })
            .collect();
        members.sort_by_key(|m| m.joined_at);
        Ok(members)
    }

    async fn list_location_invites(&self, location_id: Uuid) -> AppResult<Vec<LocationInvite>> {
        let mut invites: Vec<LocationInvite> = self
            .invites
            .iter()
            .filter(|i| i.location_id == location_id)
            .filter_map(|i| {
                self.users.get(&i.user_id).map(|u| LocationInvite {
                    location_id: i.location_id,
                    user_id: i.user_id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                    invited_at: i.invited_at,
                })
            })
            .collect();
        invites.sort_by_key(|i| i.invited_at);
        Ok(invites)
    }

    async fn add_location_member(
        &self,
        location_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Membership> {
        self.ensure_relation_targets(location_id, user_id)?;
        let membership = self
            .members
            .entry((location_id, user_id))
            .or_insert_with(|| Membership {
                location_id,
                user_id,
                joined_at: Utc::now(),
            })
            .value()
            .clone();
        Ok(membership)
    }

    async fn remove_location_member(&self, location_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        Ok(self.members.remove(&(location_id, user_id)).is_some())
    }

    async fn add_location_invite(
        &self,
        location_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Invitation> {
        self.ensure_relation_targets(location_id, user_id)?;
        let invitation = self
            .invites
            .entry((location_id, user_id))
            .or_insert_with(|| Invitation {
                location_id,
                user_id,
                invited_at: Utc::now(),
            })
            .value()
            .clone();
        Ok(invitation)
    }

    async fn remove_location_invite(&self, location_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        Ok(self.invites.remove(&(location_id, user_id)).is_some())
    }

    async fn list_user_locations(&self, user_id: Uuid) -> AppResult<Vec<UserLocation>> {
        let mut locations: Vec<UserLocation> = self
            .members
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| {
                self.locations.get(&m.location_id).map(|l| UserLocation {
                    user_id,
                    location_id: l.id,
                    location_name: l.name.clone(),
                    owner_id: l.owner_id,
                    joined_at: m.joined_at,
                })
            })
            .collect();
        locations.sort_by_key(|l| l.joined_at);
        Ok(locations)
    }

    async fn list_user_invites(&self, user_id: Uuid) -> AppResult<Vec<UserInvite>> {
        let mut invites: Vec<UserInvite> = self
            .invites
            .iter()
            .filter(|i| i.user_id == user_id)
            .filter_map(|i| {
                self.locations.get(&i.location_id).map(|l| UserInvite {
                    user_id,
                    location_id: l.id,
                    location_name: l.name.clone(),
                    owner_id: l.owner_id,
                    invited_at: i.invited_at,
                })
            })
            .collect();
        invites.sort_by_key(|i| i.invited_at);
        Ok(invites)
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryStore {
    async fn create_refresh_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        if !self.users.contains_key(&user_id) {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        if self.tokens.contains_key(token) {
            return Err(AppError::conflict("Refresh token already exists"));
        }
        let now = Utc::now();
        let row = RefreshToken {
            token: token.to_string(),
            created_at: now,
            updated_at: now,
            user_id,
            expires_at,
            revoked_at: None,
        };
        self.tokens.insert(row.token.clone(), row.clone());
        Ok(row)
    }

    async fn find_refresh_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.tokens.get(token).map(|t| t.value().clone()))
    }

    async fn revoke_refresh_token(&self, token: &str) -> AppResult<bool> {
        match self.tokens.get_mut(token) {
            Some(mut row) => {
                if row.revoked_at.is_none() {
                    let now = Utc::now();
                    row.revoked_at = Some(now);
                    row.updated_at = now;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_refresh_tokens(&self, user_id: Uuid) -> AppResult<u64> {
        let now = Utc::now();
        let mut count = 0;
        for mut row in self.tokens.iter_mut() {
            if row.user_id == user_id && row.revoked_at.is_none() {
                row.revoked_at = Some(now);
                row.updated_at = now;
                count += 1;
            }
        }
        Ok(count)
    }
}

#[async_trait]
impl CaseStore for MemoryStore {
    async fn create_case(&self, data: &NewCase) -> AppResult<Case> {
        if !self.locations.contains_key(&data.location_id) {
            return Err(AppError::not_found(format!(
                "Location {} not found",
                data.location_id
            )));
        }
        let now = Utc::now();
        let case = Case {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name: data.name.clone(),
            location_id: data.location_id,
        };
        self.cases.insert(case.id, case.clone());
        Ok(case)
    }

    async fn find_case(&self, id: Uuid) -> AppResult<Option<Case>> {
        Ok(self.cases.get(&id).map(|c| c.value().clone()))
    }

    async fn list_cases_by_location(&self, location_id: Uuid) -> AppResult<Vec<Case>> {
        let mut cases: Vec<Case> = self
            .cases
            .iter()
            .filter(|c| c.location_id == location_id)
            .map(|c| c.value().clone())
            .collect();
        cases.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cases)
    }

    async fn rename_case(&self, id: Uuid, name: &str) -> AppResult<Option<Case>> {
        Ok(self.cases.get_mut(&id).map(|mut c| {
            c.name = name.to_string();
            c.updated_at = Utc::now();
            c.value().clone()
        }))
    }

    async fn delete_case(&self, id: Uuid) -> AppResult<bool> {
        if self.cases.remove(&id).is_none() {
            return Ok(false);
        }
        self.shelves.retain(|_, s| s.case_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ShelfStore for MemoryStore {
    async fn create_shelf(&self, data: &NewShelf) -> AppResult<Shelf> {
        if !self.cases.contains_key(&data.case_id) {
            return Err(AppError::not_found(format!("Case {} not found", data.case_id)));
        }
        let now = Utc::now();
        let shelf = Shelf {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name: data.name.clone(),
            case_id: data.case_id,
        };
        self.shelves.insert(shelf.id, shelf.clone());
        Ok(shelf)
    }

    async fn find_shelf(&self, id: Uuid) -> AppResult<Option<Shelf>> {
        Ok(self.shelves.get(&id).map(|s| s.value().clone()))
    }

    async fn list_shelves_by_case(&self, case_id: Uuid) -> AppResult<Vec<Shelf>> {
        let mut shelves: Vec<Shelf> = self
            .shelves
            .iter()
            .filter(|s| s.case_id == case_id)
            .map(|s| s.value().clone())
            .collect();
        shelves.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(shelves)
    }

    async fn rename_shelf(&self, id: Uuid, name: &str) -> AppResult<Option<Shelf>> {
        Ok(self.shelves.get_mut(&id).map(|mut s| {
            s.name = name.to_string();
            s.updated_at = Utc::now();
            s.value().clone()
        }))
    }

    async fn delete_shelf(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.shelves.remove(&id).is_some())
    }

    async fn find_shelf_location(&self, id: Uuid) -> AppResult<Option<Uuid>> {
        let Some(case_id) = self.shelves.get(&id).map(|s| s.case_id) else {
            return Ok(None);
        };
        Ok(self.cases.get(&case_id).map(|c| c.location_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shelfhub_core::error::ErrorKind;

    async fn user(store: &MemoryStore, email: &str) -> User {
        store
            .create_user(&CreateUser {
                name: email.split('@').next().unwrap().to_string(),
                email: email.to_string(),
                hashed_password: "hash".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_case_insensitively() {
        let store = MemoryStore::new();
        user(&store, "ada@example.com").await;
        let err = store
            .create_user(&CreateUser {
                name: "Other".into(),
                email: "ADA@example.com".into(),
                hashed_password: "hash".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_invites_are_unique_per_pair() {
        let store = MemoryStore::new();
        let owner = user(&store, "owner@example.com").await;
        let guest = user(&store, "guest@example.com").await;
        let location = store
            .create_location(&CreateLocation {
                name: "Den".into(),
                owner_id: owner.id,
            })
            .await
            .unwrap();

        let first = store.add_location_invite(location.id, guest.id).await.unwrap();
        let second = store.add_location_invite(location.id, guest.id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.list_location_invites(location.id).await.unwrap().len(), 1);
        assert_eq!(store.list_user_invites(guest.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_relation_write_to_missing_location_is_not_found() {
        let store = MemoryStore::new();
        let guest = user(&store, "guest@example.com").await;
        let err = store
            .add_location_member(Uuid::new_v4(), guest.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_remove_reports_absence() {
        let store = MemoryStore::new();
        assert!(!store
            .remove_location_member(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap());
        assert!(!store
            .remove_location_invite(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_revoke_keeps_first_timestamp() {
        let store = MemoryStore::new();
        let ada = user(&store, "ada@example.com").await;
        store
            .create_refresh_token(ada.id, "tok", Utc::now() + Duration::days(60))
            .await
            .unwrap();

        assert!(store.revoke_refresh_token("tok").await.unwrap());
        let first = store.find_refresh_token("tok").await.unwrap().unwrap();
        assert!(store.revoke_refresh_token("tok").await.unwrap());
        let second = store.find_refresh_token("tok").await.unwrap().unwrap();
        assert_eq!(first.revoked_at, second.revoked_at);
        assert!(!store.revoke_refresh_token("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_all_counts_only_new_revocations() {
        let store = MemoryStore::new();
        let ada = user(&store, "ada@example.com").await;
        let bob = user(&store, "bob@example.com").await;
        let expiry = Utc::now() + Duration::days(60);
        store.create_refresh_token(ada.id, "a1", expiry).await.unwrap();
        store.create_refresh_token(ada.id, "a2", expiry).await.unwrap();
        store.create_refresh_token(bob.id, "b1", expiry).await.unwrap();

        assert_eq!(store.revoke_all_refresh_tokens(ada.id).await.unwrap(), 2);
        assert_eq!(store.revoke_all_refresh_tokens(ada.id).await.unwrap(), 0);
        let bobs = store.find_refresh_token("b1").await.unwrap().unwrap();
        assert!(!bobs.is_revoked());
    }

    #[tokio::test]
    async fn test_delete_all_users_cascades() {
        let store = MemoryStore::new();
        let ada = user(&store, "ada@example.com").await;
        let location = store
            .create_location(&CreateLocation {
                name: "Den".into(),
                owner_id: ada.id,
            })
            .await
            .unwrap();
        store.add_location_member(location.id, ada.id).await.unwrap();

        assert_eq!(store.delete_all_users().await.unwrap(), 1);
        assert!(store.find_location(location.id).await.unwrap().is_none());
        assert!(store.list_user_locations(ada.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_case_drops_its_shelves() {
        let store = MemoryStore::new();
        let ada = user(&store, "ada@example.com").await;
        let location = store
            .create_location(&CreateLocation {
                name: "Den".into(),
                owner_id: ada.id,
            })
            .await
            .unwrap();
        let case = store
            .create_case(&NewCase {
                location_id: location.id,
                name: "Oak".into(),
            })
            .await
            .unwrap();
        let shelf = store
            .create_shelf(&NewShelf {
                case_id: case.id,
                name: "Top".into(),
            })
            .await
            .unwrap();
        assert_eq!(
            store.find_shelf_location(shelf.id).await.unwrap(),
            Some(location.id)
        );

        assert!(store.delete_case(case.id).await.unwrap());
        assert!(store.find_shelf(shelf.id).await.unwrap().is_none());
        assert!(!store.delete_case(case.id).await.unwrap());

        let err = store
            .create_shelf(&NewShelf {
                case_id: case.id,
                name: "Orphan".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
