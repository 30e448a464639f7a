//! Convenience result type alias for DavBridge.

use crate::error::AppError;

/// A specialized `Result` type for DavBridge operations.
pub type AppResult<T> = Result<T, AppError>;
