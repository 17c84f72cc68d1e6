//! HTTP request execution configuration.

use crate::config::get_config;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters controlling how one request is executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Request timeout in milliseconds, covering connect, headers and body.
    pub timeout_ms: u64,
}

impl ExecutionConfig {
    /// Creates a new ExecutionConfig with the given timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout_ms` - Timeout duration in milliseconds
    pub fn new(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ExecutionConfig {
    /// Reads the timeout from the global configuration.
    fn default() -> Self {
        Self {
            timeout_ms: get_config().timeout,
        }
    }
}
