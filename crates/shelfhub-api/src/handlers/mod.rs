//! Route handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod case;
pub mod catalog;
pub mod location;
pub mod page;
pub mod shelf;
pub mod user;
