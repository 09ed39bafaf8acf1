//! Convenience result type alias for GatorTicket.

use crate::error::AppError;

/// A specialized `Result` type for GatorTicket operations.
pub type AppResult<T> = Result<T, AppError>;
