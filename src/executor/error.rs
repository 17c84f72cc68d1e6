//! HTTP request execution error types.

use thiserror::Error;

/// Reasons a request produced no usable response.
///
/// A non-2xx status is not an error: any received response is reported as
/// [`ResponseResult::Success`](crate::models::ResponseResult::Success).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Connection failures, DNS resolution errors and broken transfers.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// No response within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The client rejected the request before sending it (e.g. a header
    /// name with illegal characters).
    #[error("Request build error: {0}")]
    BuildError(String),
}

/// Maps reqwest's error kinds onto [`RequestError`].
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else {
            RequestError::NetworkError(err.to_string())
        }
    }
}

impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}
