//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait, the shape of the browser's local
//! storage: string values under string keys, scoped to one browser profile. The
//! receipt cache is written against this trait so it can run on the page's own store,
//! on a file when hosted natively, or in memory under test.

use crate::domain::error::Result;

/// String-keyed, string-valued persistent store.
///
/// # Implementations
///
/// - [`MemoryStore`](super::MemoryStore): process-local map
/// - [`JsonFileStore`](super::JsonFileStore): JSON file with atomic writes
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (quota exceeded, disk error, ...).
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn remove(&mut self, key: &str) -> Result<()>;
}
