//! Storage module for persistence and configuration.

pub mod config;
pub mod local_store;

pub use config::{AppConfig, ConfigError, MapSettings, StorageSettings};
pub use local_store::{FileStore, LocalStore, MemoryStore, StorageError, WORKOUTS_KEY};
