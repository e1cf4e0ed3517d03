//! Key-value slot storage.
//!
//! The cart and favorites each persist into one named slot of a
//! [`KeyValueStore`]. The trait mirrors the browser's local storage: string
//! keys, string values, whole-value replacement. Backends:
//!
//! - [`MemoryStore`] - in-process map, optional byte quota; for tests and
//!   ephemeral sessions
//! - [`FileStore`] - one JSON file per slot in a data directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// Storage backend for named string slots.
///
/// Implementations must be thread-safe (`Send + Sync`). Writes replace the
/// whole slot; there is no merge or locking across processes, so concurrent
/// writers to the same slot are last-writer-wins.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot.
    ///
    /// Returns `Ok(None)` if the slot has never been written.
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Create or replace a slot.
    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot.
    ///
    /// Returns `Ok(true)` if the slot existed.
    fn remove(&self, slot: &str) -> Result<bool, StorageError>;
}
