//! Session entities.

pub mod token;

pub use token::RefreshToken;
