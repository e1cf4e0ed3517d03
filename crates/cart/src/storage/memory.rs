//! In-memory slot store.

use std::collections::HashMap;
use std::sync::RwLock;

use super::KeyValueStore;
use crate::error::StorageError;

/// An in-memory implementation of [`KeyValueStore`].
///
/// All data lives in a `HashMap` behind a `RwLock` and is lost when the store
/// is dropped. An optional quota caps the total bytes held (keys plus
/// values), so tests can exercise the storage-full path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes beyond `bytes` in total.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    /// Create a store pre-populated with one slot.
    #[must_use]
    pub fn with_slot(slot: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(slot.to_string(), value.to_string());
        Self {
            slots: RwLock::new(slots),
            quota: None,
        }
    }
}

fn poisoned(e: impl std::fmt::Display) -> StorageError {
    StorageError::Unavailable(format!("lock poisoned: {e}"))
}

impl KeyValueStore for MemoryStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.read().map_err(poisoned)?;
        Ok(slots.get(slot).cloned())
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().map_err(poisoned)?;

        if let Some(limit) = self.quota {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != slot)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let required = others + slot.len() + value.len();
            if required > limit {
                return Err(StorageError::QuotaExceeded {
                    slot: slot.to_string(),
                    required,
                    limit,
                });
            }
        }

        slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<bool, StorageError> {
        let mut slots = self.slots.write().map_err(poisoned)?;
        Ok(slots.remove(slot).is_some())
    }
}
