//! String-keyed persistence for session and favorites

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Stores every key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        let mut path = self.dir.clone();
        path.push(format!("{}.json", key));
        path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Volatile store, e.g. for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Missing and unparsable entries both count as absent
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let content = store.get(key)?;
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unparsable entry '{}': {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(value)?;
    store.set(key, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("store"));
        assert_eq!(store.get("session"), None);

        store.set("session", "{\"a\":1}").unwrap();
        assert_eq!(store.get("session").as_deref(), Some("{\"a\":1}"));
        assert!(temp_dir.path().join("store").join("session.json").exists());

        store.remove("session").unwrap();
        assert_eq!(store.get("session"), None);
        // Removing twice is fine
        store.remove("session").unwrap();
    }

    #[test]
    fn test_load_json_treats_garbage_as_absent() {
        let mut store = MemoryStore::default();
        store.set("favorites", "not json").unwrap();
        let loaded: Option<Vec<i64>> = load_json(&store, "favorites");
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_save_and_load_json() {
        let mut store = MemoryStore::default();
        save_json(&mut store, "numbers", &vec![3, 1, 2]).unwrap();
        let loaded: Option<Vec<i64>> = load_json(&store, "numbers");
        assert_eq!(loaded, Some(vec![3, 1, 2]));
    }
}
