//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use shelfhub_core::error::AppError;

/// Shortest password accepted at registration or update.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// One-way password hashing using Argon2id with per-hash random salts.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Hash of a throwaway password, verified against when the account
    /// does not exist so both login failure paths cost one Argon2 run.
    decoy_hash: String,
}

impl PasswordHasher {
    /// Creates a new password hasher.
    pub fn new() -> Result<Self, AppError> {
        let decoy_hash = hash_with_fresh_salt("shelfhub-decoy-password")?;
        Ok(Self { decoy_hash })
    }

    /// Hashes a plaintext password after checking its length.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        hash_with_fresh_salt(password)
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(true)` on a match and `Ok(false)` on a mismatch. A
    /// corrupt stored hash is an internal error.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Burns one verification for a login against an unknown account.
    pub fn verify_decoy(&self, password: &str) {
        let _ = self.verify_password(password, &self.decoy_hash);
    }
}

fn hash_with_fresh_salt(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}
