//! User service.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::ValidateEmail;

use shelfhub_auth::PasswordHasher;
use shelfhub_core::config::app::Platform;
use shelfhub_core::error::AppError;
use shelfhub_database::store::{LocationStore, UserStore};
use shelfhub_entity::location::{UserInvite, UserLocation};
use shelfhub_entity::user::{CreateUser, UpdateUser, User};

use crate::context::RequestContext;

/// Manages accounts and the per-user views of locations and invitations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    locations: Arc<dyn LocationStore>,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        locations: Arc<dyn LocationStore>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            users,
            locations,
            hasher,
        }
    }

    /// Registers a new account. Emails are unique case-insensitively.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        let email = normalize_email(email)?;
        let hashed_password = self.hasher.hash_password(password)?;

        let user = self
            .users
            .create_user(&CreateUser {
                name: name.to_string(),
                email,
                hashed_password,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Changes the caller's email and/or password. Omitted fields keep
    /// their current value.
    pub async fn update_credentials(
        &self,
        ctx: &RequestContext,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AppError> {
        let current = self.get(ctx, ctx.user_id).await?;

        let email = match email {
            Some(email) => normalize_email(email)?,
            None => current.email,
        };
        let hashed_password = match password {
            Some(password) => self.hasher.hash_password(password)?,
            None => current.hashed_password,
        };

        let user = self
            .users
            .update_user(&UpdateUser {
                id: ctx.user_id,
                email,
                hashed_password,
            })
            .await?;

        info!(user_id = %user.id, "User credentials updated");
        Ok(user)
    }

    /// Looks up a user by ID.
    pub async fn get(&self, _ctx: &RequestContext, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Looks up a user by email.
    pub async fn find_by_email(&self, _ctx: &RequestContext, email: &str) -> Result<User, AppError> {
        self.users
            .find_user_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::not_found("No user with that email"))
    }

    /// Lists every user.
    pub async fn list(&self, _ctx: &RequestContext) -> Result<Vec<User>, AppError> {
        self.users.list_users().await
    }

    /// Locations `user_id` has joined. Callers may only list their own.
    pub async fn locations_of(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<Vec<UserLocation>, AppError> {
        if !ctx.is_self(user_id) {
            return Err(AppError::forbidden(
                "User is not authorized to view another user's locations",
            ));
        }
        self.locations.list_user_locations(user_id).await
    }

    /// Invitations addressed to `user_id`. Callers may only list their own.
    pub async fn invites_of(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<Vec<UserInvite>, AppError> {
        if !ctx.is_self(user_id) {
            return Err(AppError::forbidden(
                "User is not authorized to view another user's invitations",
            ));
        }
        self.locations.list_user_invites(user_id).await
    }

    /// Wipes every account and everything hanging off them. Only available
    /// on the `dev` platform.
    pub async fn reset_all(&self, platform: Platform) -> Result<u64, AppError> {
        if !platform.is_dev() {
            return Err(AppError::forbidden("Reset is only available in dev"));
        }
        let removed = self.users.delete_all_users().await?;
        warn!(removed, "All user data deleted");
        Ok(removed)
    }
}

fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim();
    if !email.validate_email() {
        return Err(AppError::validation(format!("Invalid email address: {email}")));
    }
    Ok(email.to_string())
}
