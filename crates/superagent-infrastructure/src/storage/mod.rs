//! File-backed storage primitives.

mod config_storage;

pub use config_storage::{ConfigStorage, ConfigStorageError};
