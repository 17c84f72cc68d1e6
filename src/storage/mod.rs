//! Workspace-scoped persistence of settings values.
//!
//! Stores hold one JSON value per key. The auth and base URL stores are built
//! on top of a [`WorkspaceStorage`] handle, so tests can swap the settings
//! file for [`MemoryStorage`].

pub mod memory;
pub mod settings_file;

pub use memory::MemoryStorage;
pub use settings_file::SettingsFileStorage;

use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the settings file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// File being parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// The settings file parsed, but its top level is not an object.
    #[error("settings file {0} must contain a JSON object")]
    NotAnObject(PathBuf),

    /// A value could not be converted to JSON for storage.
    #[error("failed to encode {key}: {source}")]
    Encode {
        /// Settings key being written
        key: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// A key/value store scoped to one workspace.
///
/// Writes are last-write-wins. Nothing is transactional across keys.
pub trait WorkspaceStorage: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Stores `value` under `key`, replacing any prior value.
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

impl<T: WorkspaceStorage + ?Sized> WorkspaceStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Shared storage handle.
pub type SharedStorage = Arc<dyn WorkspaceStorage>;
