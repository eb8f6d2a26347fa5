//! Convenience result type alias for SSA Hub.

use crate::error::AppError;

/// A specialized `Result` type for SSA Hub operations.
pub type AppResult<T> = Result<T, AppError>;
