//! Error types for the store crate.

use retrievix_core::{Error as CoreError, ErrorCode};
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by item stores and the match service.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No item with this id
    #[error("item not found: {0}")]
    NotFound(String),

    /// The session does not own the item
    #[error("not allowed: {0}")]
    Unauthorized(String),

    /// A submitted report failed validation
    #[error("invalid item: {0}")]
    Validation(String),

    /// Status change on an item that is already resolved
    #[error("item {0} is already resolved")]
    AlreadyResolved(String),

    /// The backing store could not be reached in time
    #[error("item store unavailable: {0}")]
    Unavailable(String),

    /// Snapshot file error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error code for integration with retrievix-core error handling.
/// Range: 11xxx for store errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    NotFound = 11001,
    Unauthorized = 11002,
    Validation = 11003,
    AlreadyResolved = 11004,
    Unavailable = 11005,
    Io = 11006,
    Json = 11007,
}

impl StoreError {
    /// Returns the error code for this error.
    pub fn code(&self) -> StoreErrorCode {
        match self {
            StoreError::NotFound(_) => StoreErrorCode::NotFound,
            StoreError::Unauthorized(_) => StoreErrorCode::Unauthorized,
            StoreError::Validation(_) => StoreErrorCode::Validation,
            StoreError::AlreadyResolved(_) => StoreErrorCode::AlreadyResolved,
            StoreError::Unavailable(_) => StoreErrorCode::Unavailable,
            StoreError::Io(_) => StoreErrorCode::Io,
            StoreError::Json(_) => StoreErrorCode::Json,
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => CoreError::item_not_found(&id),
            StoreError::Unauthorized(msg) => CoreError::unauthorized(msg),
            StoreError::Validation(msg) => CoreError::validation(msg),
            StoreError::AlreadyResolved(id) => CoreError::new(
                ErrorCode::AlreadyResolved,
                format!("Item {id} is already resolved"),
            ),
            StoreError::Unavailable(msg) => CoreError::store_unavailable(msg),
            StoreError::Io(e) => CoreError::from(e),
            StoreError::Json(e) => CoreError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(StoreError::NotFound("x".into()).code() as u32, 11001);
        assert_eq!(
            StoreError::Unavailable("timeout".into()).code(),
            StoreErrorCode::Unavailable
        );
    }

    #[test]
    fn test_into_core_error() {
        let core: CoreError = StoreError::Unauthorized("delete L-1".into()).into();
        assert_eq!(core.code, ErrorCode::UnauthorizedAccess);

        let core: CoreError = StoreError::AlreadyResolved("F-2".into()).into();
        assert_eq!(core.code, ErrorCode::AlreadyResolved);
        assert!(core.message.contains("F-2"));
    }
}
