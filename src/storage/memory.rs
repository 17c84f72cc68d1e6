//! In-memory storage, used by tests and for throwaway sessions.

use super::{StorageError, WorkspaceStorage};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// A [`WorkspaceStorage`] that keeps values in a map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WorkspaceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
        Ok(())
    }
}
