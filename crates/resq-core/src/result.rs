//! Convenience result type alias for ResQ.

use crate::error::AppError;

/// A specialized `Result` type for ResQ operations.
pub type AppResult<T> = Result<T, AppError>;
