//! # shelfhub-service
//!
//! Business logic service layer for ShelfHub. Each service checks the
//! caller's relation to the location involved through
//! [`LocationAccess`](shelfhub_auth::LocationAccess), then delegates to
//! the stores.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod catalog;
pub mod context;
pub mod location;
pub mod user;

pub use catalog::{CaseService, CatalogService, ShelfService};
pub use context::RequestContext;
pub use location::LocationService;
pub use user::UserService;
