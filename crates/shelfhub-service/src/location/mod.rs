//! Location, membership, and invitation workflows.

pub mod service;

pub use service::LocationService;
