//! Error types for the match crate.
//!
//! Scoring and ranking are total; these errors only come from building a
//! configuration or parsing user-supplied enum values.

use thiserror::Error;

/// Result type alias for match operations.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors raised while configuring the engine or parsing item fields.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    /// Threshold outside `[0, 1]`
    #[error("threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    /// A result cap of zero
    #[error("{0} must be at least 1")]
    ZeroCap(&'static str),

    /// Category label outside the closed set
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Item type other than lost or found
    #[error("unknown item type: {0} (expected lost or found)")]
    UnknownItemType(String),
}

/// Error code for integration with retrievix-core error handling.
/// Range: 12xxx for match errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchErrorCode {
    /// Threshold outside `[0, 1]`
    ThresholdOutOfRange = 12001,
    /// A result cap of zero
    ZeroCap = 12002,
    /// Unknown category label
    UnknownCategory = 12003,
    /// Unknown item type
    UnknownItemType = 12004,
}

impl MatchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> MatchErrorCode {
        match self {
            MatchError::ThresholdOutOfRange(_) => MatchErrorCode::ThresholdOutOfRange,
            MatchError::ZeroCap(_) => MatchErrorCode::ZeroCap,
            MatchError::UnknownCategory(_) => MatchErrorCode::UnknownCategory,
            MatchError::UnknownItemType(_) => MatchErrorCode::UnknownItemType,
        }
    }
}
