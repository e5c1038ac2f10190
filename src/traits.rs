//! Common trait definitions
//!
//! Defines the storage seam used by the notes store. Production code uses
//! `FileKeyValueStore`, tests can use `MemoryKeyValueStore` or their own
//! implementations.

use anyhow::Result;

/// Trait for string key-value persistence
///
/// Abstracts the small persistent store that backs the notes text, in the
/// spirit of a browser's local storage: string keys, string values, no
/// transactions.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing is stored
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}
