//! Cases, shelves, and the items stored on them.
//!
//! Every operation here resolves the location an entity belongs to and
//! requires the caller to be a member of it. An id that does not exist is
//! refused the same way as one in another location.

pub mod case;
pub mod item;
pub mod shelf;

pub use case::CaseService;
pub use item::CatalogService;
pub use shelf::ShelfService;

use validator::Validate;

use shelfhub_core::error::AppError;

/// Runs derive-based validation, folding failures into a `Validation` error.
pub(crate) fn validate<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// Refusal for a case, shelf, or item the caller cannot reach.
pub(crate) fn out_of_reach(kind: &str) -> AppError {
    AppError::forbidden(format!(
        "User is not a member of the location holding this {kind}"
    ))
}
