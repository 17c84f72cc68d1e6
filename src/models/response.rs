//! Response data models.
//!
//! A [`ResponseResult`] exists only for the duration of one render: either a
//! response arrived (whatever its status) or the request failed before one did.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// An HTTP response received from a server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// HTTP status text (e.g., "OK", "Not Found").
    pub status_text: String,

    /// Response headers.
    pub headers: HashMap<String, String>,

    /// Response body. JSON bodies are parsed; anything else is kept as a
    /// JSON string holding the raw text.
    pub body: Value,

    /// Wall-clock time from send to complete body.
    pub duration: Duration,
}

impl HttpResponse {
    /// Creates a new HttpResponse with an empty body.
    pub fn new(status_code: u16, status_text: String) -> Self {
        Self {
            status_code,
            status_text,
            headers: HashMap::new(),
            body: Value::Null,
            duration: Duration::from_secs(0),
        }
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

}

/// Outcome of executing one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResponseResult {
    /// A response was received. Non-2xx statuses land here too.
    Success(HttpResponse),

    /// No complete response was obtained.
    Failure {
        /// Human-readable failure description.
        error_message: String,
        /// Status of the response, if one started arriving.
        partial_status: Option<u16>,
        /// Whatever part of the body was decoded.
        partial_body: Option<Value>,
    },
}

impl ResponseResult {
    /// Builds a failure with no partial response.
    pub fn failure(error_message: impl Into<String>) -> Self {
        ResponseResult::Failure {
            error_message: error_message.into(),
            partial_status: None,
            partial_body: None,
        }
    }

    /// Status code of the response, full or partial.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResponseResult::Success(response) => Some(response.status_code),
            ResponseResult::Failure { partial_status, .. } => *partial_status,
        }
    }

    /// `true` only for a received 2xx response.
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseResult::Success(response) if response.is_success())
    }
}
