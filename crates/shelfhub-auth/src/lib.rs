//! # shelfhub-auth
//!
//! Authentication and location authorization for ShelfHub.
//!
//! ## Modules
//!
//! - `jwt`: signed access token issuance and validation
//! - `password`: Argon2id password hashing
//! - `session`: refresh token generation and the login/refresh/revoke lifecycle
//! - `access`: owner / member / invited relation checks on locations

pub mod access;
pub mod jwt;
pub mod password;
pub mod session;

pub use access::{LocationAccess, Relations};
pub use jwt::{AccessToken, Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use session::{LoginResult, SessionManager};
