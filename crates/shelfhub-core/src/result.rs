//! Convenience result type alias for ShelfHub.

use crate::error::AppError;

/// A specialized `Result` type for ShelfHub operations.
pub type AppResult<T> = Result<T, AppError>;
