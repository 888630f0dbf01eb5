use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{ReviewSummaryError, Result};

#[cfg(test)]
use mockall::automock;

/// Injectable persisted key-value slot. Read once at initialization,
/// written synchronously on each change; single writer by construction.
#[cfg_attr(test, automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Read a persisted value, falling back to the default on any storage
/// failure. Storage errors are logged and never surfaced to the user.
pub fn read_or_default(store: &dyn KeyValueStore, key: &str, default: &str) -> String {
    match store.get(key) {
        Ok(Some(value)) => value,
        Ok(None) => default.to_string(),
        Err(e) => {
            tracing::warn!("Failed to read '{}' from store: {} - using default", key, e);
            default.to_string()
        }
    }
}

/// Write a persisted value, logging failures instead of propagating them.
pub fn write_logged(store: &dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        tracing::warn!("Failed to persist '{}': {}", key, e);
    }
}

/// File-backed store: one JSON object of string slots per file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| ReviewSummaryError::LocalStorage(e.to_string()))?;
        serde_json::from_str(&contents)
            .map_err(|e| ReviewSummaryError::LocalStorage(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        let contents = serde_json::to_string_pretty(&map)?;
        fs::write(&self.path, contents)
            .map_err(|e| ReviewSummaryError::LocalStorage(e.to_string()))
    }
}
