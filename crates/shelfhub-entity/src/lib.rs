//! # shelfhub-entity
//!
//! Domain entity models for ShelfHub. Every struct in this crate
//! represents a database table row, a joined view over rows, or the
//! payload needed to create one. Row types additionally derive
//! `sqlx::FromRow`.

pub mod catalog;
pub mod location;
pub mod session;
pub mod user;
