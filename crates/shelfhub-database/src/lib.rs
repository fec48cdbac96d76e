//! # shelfhub-database
//!
//! PostgreSQL connection management, the store traits the auth and
//! service layers are written against, their Postgres repositories, and
//! an in-memory store used by tests and local tooling.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{CaseStore, LocationStore, RefreshTokenStore, ShelfStore, UserStore};
