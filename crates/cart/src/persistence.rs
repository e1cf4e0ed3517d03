//! Snapshot persistence for the cart.
//!
//! A snapshot is the full list of cart lines encoded as a JSON array and
//! written to one fixed slot. Loading is failure-tolerant: a missing,
//! unreadable or malformed slot is an empty cart. The `try_*` methods expose
//! the underlying [`PersistError`] for callers that want to observe it.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{PersistError, Result};
use crate::item::LineItem;
use crate::state::CartState;
use crate::storage::KeyValueStore;

/// Slot holding the cart snapshot.
pub const CART_SLOT: &str = "planto:cart:v1";

/// Slot holding the favorites list.
pub const FAVORITES_SLOT: &str = "planto:favorites";

/// Load/save seam between the cart store and its storage.
///
/// Implement this to plug in a different snapshot format or a test double.
pub trait CartPersistence {
    /// Read the stored lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage fails or holds something other than a
    /// list of cart lines.
    fn try_load(&self) -> Result<Vec<LineItem>>;

    /// Replace the stored lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the lines cannot be encoded or the storage rejects
    /// the write.
    fn try_save(&self, items: &[LineItem]) -> Result<()>;

    /// Read the stored cart, degrading every failure to an empty cart.
    fn load(&self) -> CartState {
        match self.try_load() {
            Ok(items) => CartState::from_items(items),
            Err(e) => {
                warn!(error = %e, "Failed to load cart snapshot, starting empty");
                CartState::new()
            }
        }
    }

    /// Write the cart.
    ///
    /// # Errors
    ///
    /// Same as [`try_save`](Self::try_save).
    fn save(&self, state: &CartState) -> Result<()> {
        self.try_save(state.items())
    }
}

/// A JSON list kept in one slot of a [`KeyValueStore`].
#[derive(Clone)]
pub struct JsonSlot {
    storage: Arc<dyn KeyValueStore>,
    slot: String,
}

impl std::fmt::Debug for JsonSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSlot").field("slot", &self.slot).finish_non_exhaustive()
    }
}

impl JsonSlot {
    /// Bind a slot name to a storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, slot: impl Into<String>) -> Self {
        Self {
            storage,
            slot: slot.into(),
        }
    }

    /// The cart snapshot slot of `storage`.
    #[must_use]
    pub fn cart(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::new(storage, CART_SLOT)
    }

    /// The favorites slot of `storage`.
    #[must_use]
    pub fn favorites(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::new(storage, FAVORITES_SLOT)
    }

    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Read and decode the list.
    ///
    /// An absent slot is an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage read fails, the value is not JSON,
    /// is not an array, or an element does not decode as `T`.
    pub fn read_list<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let Some(raw) = self.storage.get(&self.slot)? else {
            return Ok(Vec::new());
        };

        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|source| self.decode_error(source))?;
        if !value.is_array() {
            return Err(PersistError::NotAList {
                slot: self.slot.clone(),
            });
        }
        serde_json::from_value(value).map_err(|source| self.decode_error(source))
    }

    /// Encode and write the list, replacing the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the storage rejects the write.
    pub fn write_list<T: Serialize>(&self, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items).map_err(|source| PersistError::Encode {
            slot: self.slot.clone(),
            source,
        })?;
        self.storage.set(&self.slot, &raw)?;
        Ok(())
    }

    fn decode_error(&self, source: serde_json::Error) -> PersistError {
        PersistError::Decode {
            slot: self.slot.clone(),
            source,
        }
    }
}

impl CartPersistence for JsonSlot {
    fn try_load(&self) -> Result<Vec<LineItem>> {
        self.read_list()
    }

    fn try_save(&self, items: &[LineItem]) -> Result<()> {
        self.write_list(items)
    }
}
