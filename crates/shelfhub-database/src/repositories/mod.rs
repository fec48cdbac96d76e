//! Repository implementations for all ShelfHub entities.

pub mod book;
pub mod case;
pub mod catalog;
pub mod location;
pub mod movie;
pub mod music;
pub mod refresh_token;
pub mod shelf;
pub mod show;
pub mod user;

pub use book::BookRepository;
pub use case::CaseRepository;
pub use catalog::CatalogRepository;
pub use location::LocationRepository;
pub use movie::MovieRepository;
pub use music::MusicRepository;
pub use refresh_token::RefreshTokenRepository;
pub use shelf::ShelfRepository;
pub use show::ShowRepository;
pub use user::UserRepository;
