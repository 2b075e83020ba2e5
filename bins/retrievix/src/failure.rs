//! Mapping command failures onto coded errors and exit statuses.

use retrievix_api_client::ApiError;
use retrievix_core::{Error, ErrorCode};
use retrievix_match::MatchError;
use retrievix_store::StoreError;

/// Recover the most specific error type behind `err`.
pub fn classify(err: anyhow::Error) -> Error {
    let err = match err.downcast::<Error>() {
        Ok(e) => return e,
        Err(err) => err,
    };
    let err = match err.downcast::<StoreError>() {
        Ok(e) => return from_store(e),
        Err(err) => err,
    };
    let err = match err.downcast::<ApiError>() {
        Ok(e) => return Error::from(e),
        Err(err) => err,
    };
    match err.downcast::<MatchError>() {
        Ok(e @ (MatchError::ThresholdOutOfRange(_) | MatchError::ZeroCap(_))) => {
            Error::new(ErrorCode::ConfigValidationError, e.to_string())
                .with_suggestion("check the [matching] section of your config")
        }
        Ok(e) => Error::new(ErrorCode::InvalidInput, e.to_string()),
        Err(err) => Error::new(ErrorCode::Internal, format!("{err:#}")),
    }
}

fn from_store(err: StoreError) -> Error {
    let suggestion = match &err {
        StoreError::NotFound(_) => Some("list ids with `retrievix browse --type lost`"),
        StoreError::Unavailable(_) => Some("check RETRIEVIX_API_URL or try again later"),
        _ => None,
    };
    let error = Error::from(err);
    match suggestion {
        Some(s) => error.with_suggestion(s),
        None => error,
    }
}
