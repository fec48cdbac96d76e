//! User registration, lookup, and account maintenance.

pub mod service;

pub use service::UserService;
