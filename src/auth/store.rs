//! Persistence of the active [`AuthConfig`].

use super::{AuthConfig, AUTH_KEY};
use crate::storage::{StorageError, WorkspaceStorage};

/// Reads and writes the workspace auth setting.
#[derive(Debug, Clone)]
pub struct AuthStore<S> {
    storage: S,
}

impl<S: WorkspaceStorage> AuthStore<S> {
    /// Creates a store over `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The persisted auth setting, or [`AuthConfig::None`].
    ///
    /// Never fails. Unreadable or malformed values are logged and read as
    /// `None`.
    pub fn get(&self) -> AuthConfig {
        let value = match self.storage.get(AUTH_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return AuthConfig::None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", AUTH_KEY, e);
                return AuthConfig::None;
            }
        };

        serde_json::from_value(value).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed {} value: {}", AUTH_KEY, e);
            AuthConfig::None
        })
    }

    /// Persists `auth`, replacing any prior setting.
    pub fn set(&self, auth: &AuthConfig) -> Result<(), StorageError> {
        let value = serde_json::to_value(auth).map_err(|source| StorageError::Encode {
            key: AUTH_KEY.to_string(),
            source,
        })?;
        self.storage.set(AUTH_KEY, value)?;
        log::info!("Stored {} auth", auth.kind());
        Ok(())
    }
}
