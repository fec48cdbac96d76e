//! Custom Axum extractors.

pub mod auth;
pub mod credential;
pub mod mode;

pub use auth::AuthUser;
pub use credential::RefreshCredential;
pub use mode::ResponseMode;
