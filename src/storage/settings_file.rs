//! Settings stored in a workspace JSON file.
//!
//! The file is a flat JSON object (the `.vscode/settings.json` layout). Keys
//! written by this crate sit next to whatever else the file holds, and those
//! other keys are preserved on every write.

use super::{StorageError, WorkspaceStorage};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default settings file location, relative to the workspace root.
pub const DEFAULT_SETTINGS_PATH: &str = ".vscode/settings.json";

/// A [`WorkspaceStorage`] backed by a JSON settings file.
#[derive(Debug, Clone)]
pub struct SettingsFileStorage {
    path: PathBuf,
}

impl SettingsFileStorage {
    /// Uses the settings file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses the default settings file of the workspace at `root`.
    pub fn for_workspace(root: &Path) -> Self {
        Self::new(root.join(DEFAULT_SETTINGS_PATH))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole settings object. A missing or empty file reads as `{}`.
    pub fn load_all(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        let value: Value =
            serde_json::from_str(&content).map_err(|source| StorageError::Json {
                path: self.path.clone(),
                source,
            })?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(StorageError::NotAnObject(self.path.clone())),
        }
    }

    /// Writes the settings object through a temporary file and a rename.
    fn save_all(&self, settings: &Map<String, Value>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(settings).map_err(|source| {
            StorageError::Json {
                path: self.path.clone(),
                source,
            }
        })?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut temp_file = fs::File::create(&temp_path).map_err(io_err)?;
        temp_file.write_all(json.as_bytes()).map_err(io_err)?;
        temp_file.write_all(b"\n").map_err(io_err)?;
        temp_file.flush().map_err(io_err)?;
        drop(temp_file);

        fs::rename(&temp_path, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl WorkspaceStorage for SettingsFileStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.load_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut settings = self.load_all()?;
        settings.insert(key.to_string(), value);
        log::debug!("Writing {} to {}", key, self.path.display());
        self.save_all(&settings)
    }
}
