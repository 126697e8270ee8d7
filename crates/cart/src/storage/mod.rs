//! Durable key-value stores.
//!
//! The cart record is kept under a single key in a store modeled on browser
//! local storage: string keys, string values, synchronous access.
//!
//! - [`MemoryStore`] - In-process map with optional quota and a disabled mode
//! - [`FileStore`] - One file per key in a directory, surviving restarts

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store is unavailable or full.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}
