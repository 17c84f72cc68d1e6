//! The workspace base URL that route paths are appended to.

use crate::storage::{StorageError, WorkspaceStorage};
use serde_json::Value;
use url::Url;

/// Settings key holding the base URL.
pub const BASE_URL_KEY: &str = "apiTester.baseUrl";

/// Suggested value when no base URL is stored yet.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Checks that `value` is an absolute URL.
///
/// # Returns
///
/// `Ok(())` when the value parses, otherwise `"Invalid URL"`, suitable for
/// showing next to the input prompt.
pub fn validate_base_url(value: &str) -> Result<(), String> {
    Url::parse(value.trim())
        .map(|_| ())
        .map_err(|_| "Invalid URL".to_string())
}

/// Reads and writes the workspace base URL.
///
/// An empty stored string means the URL was explicitly removed. It is kept
/// distinct from "never set" by [`get`](Self::get), and treated the same by
/// [`resolve`](Self::resolve).
#[derive(Debug, Clone)]
pub struct BaseUrlStore<S> {
    storage: S,
}

impl<S: WorkspaceStorage> BaseUrlStore<S> {
    /// Creates a store over `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The stored value, if any. Non-string values are ignored.
    pub fn get(&self) -> Option<String> {
        match self.storage.get(BASE_URL_KEY) {
            Ok(Some(Value::String(url))) => Some(url),
            Ok(Some(other)) => {
                log::warn!("Ignoring non-string {} value: {}", BASE_URL_KEY, other);
                None
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", BASE_URL_KEY, e);
                None
            }
        }
    }

    /// Stores `url`. The empty string clears the setting.
    pub fn set(&self, url: &str) -> Result<(), StorageError> {
        self.storage
            .set(BASE_URL_KEY, Value::String(url.to_string()))?;
        log::info!("Stored base URL {:?}", url);
        Ok(())
    }

    /// The base URL to send to, ignoring an empty stored value.
    pub fn resolve(&self) -> Option<String> {
        self.get().filter(|url| !url.is_empty())
    }
}
