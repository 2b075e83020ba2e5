//! Error types for the API client

use retrievix_core::{Error as CoreError, ErrorCode};
use std::fmt;
use thiserror::Error;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-2xx HTTP status
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The service answered `success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Circuit breaker is open
    #[error("Circuit breaker is open - service temporarily unavailable")]
    CircuitOpen,

    /// Rate limited
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error code for integration with retrievix-core error handling.
/// Range: 13xxx for API client errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    Request = 13001,
    Json = 13002,
    Config = 13003,
    ApiResponse = 13004,
    Rejected = 13005,
    CircuitOpen = 13006,
    RateLimited = 13007,
    RetriesExhausted = 13008,
    InvalidUrl = 13009,
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ApiErrorCode {
        match self {
            Self::Request(_) => ApiErrorCode::Request,
            Self::Json(_) => ApiErrorCode::Json,
            Self::Config(_) => ApiErrorCode::Config,
            Self::ApiResponse { .. } => ApiErrorCode::ApiResponse,
            Self::Rejected(_) => ApiErrorCode::Rejected,
            Self::CircuitOpen => ApiErrorCode::CircuitOpen,
            Self::RateLimited => ApiErrorCode::RateLimited,
            Self::RetriesExhausted { .. } => ApiErrorCode::RetriesExhausted,
            Self::InvalidUrl(_) => ApiErrorCode::InvalidUrl,
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::Rejected(_)
            | Self::CircuitOpen
            | Self::RateLimited
            | Self::Config(_)
            | Self::Json(_)
            | Self::InvalidUrl(_)
            | Self::RetriesExhausted { .. } => false,
        }
    }

    /// The service could not be reached or did not answer usefully, as
    /// opposed to answering with a refusal
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Request(_)
                | Self::Json(_)
                | Self::CircuitOpen
                | Self::RateLimited
                | Self::RetriesExhausted { .. }
        ) || self.is_server_error()
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }
}

impl From<ApiError> for CoreError {
    fn from(err: ApiError) -> Self {
        let code = match &err {
            ApiError::Config(_) | ApiError::InvalidUrl(_) => ErrorCode::ConfigError,
            ApiError::Rejected(_) => ErrorCode::RemoteRejected,
            ApiError::CircuitOpen => ErrorCode::CircuitOpen,
            ApiError::RateLimited => ErrorCode::RateLimited,
            ApiError::ApiResponse { status, .. } if *status == 401 || *status == 403 => {
                ErrorCode::UnauthorizedAccess
            }
            _ => ErrorCode::NetworkError,
        };
        let message = err.to_string();
        CoreError::new(code, message).with_source(err)
    }
}

/// Request details attached to log lines and error reports
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Request ID for correlation
    pub request_id: Option<String>,
    /// Path relative to the service root
    pub endpoint: String,
    /// HTTP method used
    pub method: String,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)?;
        if let Some(ref id) = self.request_id {
            write!(f, " (request_id: {id})")?;
        }
        Ok(())
    }
}
