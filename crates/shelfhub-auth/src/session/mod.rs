//! Refresh-token backed sessions.

pub mod manager;
pub mod token;

pub use manager::{LoginResult, SessionManager};
pub use token::generate_refresh_token;
