//! Key-value persistence for the workout log.
//!
//! Synchronous, blocking, string-keyed storage. One key holds the whole
//! serialized workout list. `FileStore` keeps one file per key on disk;
//! `MemoryStore` backs tests without touching the filesystem.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key under which the serialized workout list lives.
pub const WORKOUTS_KEY: &str = "workouts";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying read or write failed
    #[error("IO error: {0}")]
    IoError(String),
}

/// Synchronous string key-value store.
pub trait LocalStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key` and its value. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// File-backed store: one `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| StorageError::IoError(e.to_string()))?;

        Ok(Self { dir })
    }

    /// Open a store in the platform data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(crate::storage::config::get_data_dir())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value).map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(&path).map_err(|e| StorageError::IoError(e.to_string()))
    }
}

/// In-memory store for isolated construction in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}
