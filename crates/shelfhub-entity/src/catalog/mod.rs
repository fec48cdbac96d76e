//! Catalog entities: cases and shelves that structure a location, and the
//! items stored on shelves.

pub mod book;
pub mod case;
pub mod movie;
pub mod music;
pub mod shelf;
pub mod show;

use uuid::Uuid;
use validator::Validate;

pub use book::{Book, NewBook};
pub use case::{Case, NewCase};
pub use movie::{Movie, NewMovie};
pub use music::{Music, NewMusic};
pub use shelf::{NewShelf, Shelf};
pub use show::{NewShow, Show};

/// Payload for creating or replacing a catalog item.
pub trait CatalogDraft: Validate {
    /// The shelf the item is placed on.
    fn shelf_id(&self) -> Uuid;
}
