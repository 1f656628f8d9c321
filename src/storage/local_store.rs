//! Local key-value store
//!
//! A single JSON object on disk holding small pieces of client state (the
//! allocation percentages, the session). Every write rewrites the whole
//! object atomically.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::warn;

use super::file_io::{read_json, write_json_atomic};
use crate::error::{FinboardError, FinboardResult};

type Entries = BTreeMap<String, Value>;

/// Key-value store backed by one JSON file
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> FinboardResult<Entries> {
        read_json(&self.path)
    }

    /// Existing entries for a write; an unreadable file is replaced
    fn entries_for_write(&self) -> Entries {
        self.entries().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Local store unreadable, starting fresh");
            Entries::new()
        })
    }

    /// Read and decode one key
    ///
    /// `Ok(None)` when the key is absent. An unreadable file or a value of
    /// the wrong shape is an error.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> FinboardResult<Option<T>> {
        let mut entries = self.entries()?;
        match entries.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                FinboardError::Storage(format!("Malformed value under '{}': {}", key, e))
            }),
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> FinboardResult<()> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.entries_for_write();
        entries.insert(key.to_string(), value);
        write_json_atomic(&self.path, &entries)
    }

    /// Set several keys in a single write
    pub fn set_many(&self, values: &[(&str, Value)]) -> FinboardResult<()> {
        let mut entries = self.entries_for_write();
        for (key, value) in values {
            entries.insert((*key).to_string(), value.clone());
        }
        write_json_atomic(&self.path, &entries)
    }

    /// Remove keys; keys that are not present are ignored
    pub fn remove(&self, keys: &[&str]) -> FinboardResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut entries = self.entries_for_write();
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() == before {
            return Ok(());
        }
        write_json_atomic(&self.path, &entries)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> LocalStore {
        LocalStore::new(dir.path().join("data").join("local_storage.json"))
    }

    #[test]
    fn test_get_missing_key() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert_eq!(store.get::<String>("authToken").unwrap(), None);
        assert!(!store.contains("authToken"));
    }

    #[test]
    fn test_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.set("authToken", "abc123").unwrap();
        store.set("other", &42).unwrap();
        assert_eq!(store.get::<String>("authToken").unwrap().as_deref(), Some("abc123"));
        assert_eq!(store.get::<i32>("other").unwrap(), Some(42));

        store.remove(&["authToken", "missing"]).unwrap();
        assert_eq!(store.get::<String>("authToken").unwrap(), None);
        assert_eq!(store.get::<i32>("other").unwrap(), Some(42));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.set("budgetAllocation", "not an object").unwrap();

        let err = store.get::<BTreeMap<String, f64>>("budgetAllocation").unwrap_err();
        assert!(matches!(err, FinboardError::Storage(_)));
    }

    #[test]
    fn test_corrupt_file_is_replaced_on_write() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "][").unwrap();

        assert!(store.get::<String>("authToken").is_err());
        store.set("authToken", "fresh").unwrap();
        assert_eq!(store.get::<String>("authToken").unwrap().as_deref(), Some("fresh"));
    }
}
