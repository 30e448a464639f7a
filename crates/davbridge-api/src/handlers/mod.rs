//! Route handlers.

pub mod directory;
pub mod file;

use crate::error::ApiError;

/// Fallback for every method/path pair without a handler.
pub async fn unknown_endpoint() -> ApiError {
    ApiError::unknown_endpoint()
}
