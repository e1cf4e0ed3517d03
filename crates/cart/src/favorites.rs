//! Saved favorite products.
//!
//! Favorites are a newest-first list persisted in their own slot. They are
//! tied to a signed-in session: signing out clears them.
//!
//! As with the cart, a failed save keeps the in-memory list and is kept in
//! [`FavoritesStore::last_persist_error`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PersistError;
use crate::persistence::JsonSlot;

/// Rating as stored by the catalog: a number or free text (e.g. `"4.5/5"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Score(f64),
    Text(String),
}

/// A favorited product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Favorite {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subtitle: None,
            description: None,
            price: None,
            image_url: image_url.into(),
            rating: None,
        }
    }
}

/// Favorites list with slot persistence.
#[derive(Debug)]
pub struct FavoritesStore {
    slot: JsonSlot,
    items: Vec<Favorite>,
    last_persist_error: Option<PersistError>,
}

impl FavoritesStore {
    /// Open the list stored in `slot`, or an empty list if it cannot be read.
    #[must_use]
    pub fn open(slot: JsonSlot) -> Self {
        let items = slot.read_list().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load favorites, starting empty");
            Vec::new()
        });
        Self {
            slot,
            items,
            last_persist_error: None,
        }
    }

    /// Favorites, newest first.
    #[must_use]
    pub fn items(&self) -> &[Favorite] {
        &self.items
    }

    /// Whether `id` is a favorite. `None` is never a favorite.
    #[must_use]
    pub fn is_favorite(&self, id: Option<&str>) -> bool {
        id.is_some_and(|id| self.items.iter().any(|f| f.id == id))
    }

    /// Add `favorite` if absent, remove it if present.
    ///
    /// Returns `true` if it is a favorite afterwards.
    pub fn toggle(&mut self, favorite: Favorite) -> bool {
        let now_favorite = if self.is_favorite(Some(&favorite.id)) {
            self.items.retain(|f| f.id != favorite.id);
            false
        } else {
            self.items.insert(0, favorite);
            true
        };
        self.persist();
        now_favorite
    }

    /// Remove the favorite with `id`. Returns `true` if it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|f| f.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Follow the session: favorites are dropped when nobody is signed in.
    pub fn sync_session(&mut self, signed_in: bool) {
        if !signed_in && !self.items.is_empty() {
            debug!("Signed out, clearing favorites");
            self.clear();
        }
    }

    /// The error from the most recent save, if it failed.
    ///
    /// Cleared by the next successful save.
    #[must_use]
    pub const fn last_persist_error(&self) -> Option<&PersistError> {
        self.last_persist_error.as_ref()
    }

    /// Take the most recent save error, clearing it.
    pub fn take_persist_error(&mut self) -> Option<PersistError> {
        self.last_persist_error.take()
    }

    fn persist(&mut self) {
        match self.slot.write_list(&self.items) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!(error = %e, "Failed to persist favorites, continuing in memory");
                self.last_persist_error = Some(e);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::StorageError;
    use crate::persistence::FAVORITES_SLOT;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn open(storage: &Arc<MemoryStore>) -> FavoritesStore {
        FavoritesStore::open(JsonSlot::favorites(storage.clone()))
    }

    #[test]
    fn test_toggle_twice_restores_list() {
        let storage = Arc::new(MemoryStore::new());
        let mut favorites = open(&storage);

        assert!(favorites.toggle(Favorite::new("monstera", "Monstera", "m.png")));
        assert!(favorites.is_favorite(Some("monstera")));
        assert!(!favorites.toggle(Favorite::new("monstera", "Monstera", "m.png")));
        assert!(favorites.items().is_empty());
        assert_eq!(storage.get(FAVORITES_SLOT).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_newest_first_and_persisted() {
        let storage = Arc::new(MemoryStore::new());
        let mut favorites = open(&storage);
        favorites.toggle(Favorite::new("a", "A", "a.png"));
        favorites.toggle(Favorite::new("b", "B", "b.png"));

        let reopened = open(&storage);
        let ids: Vec<_> = reopened.items().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_is_favorite_none() {
        let storage = Arc::new(MemoryStore::new());
        assert!(!open(&storage).is_favorite(None));
    }

    #[test]
    fn test_sign_out_clears() {
        let storage = Arc::new(MemoryStore::new());
        let mut favorites = open(&storage);
        favorites.toggle(Favorite::new("a", "A", "a.png"));

        favorites.sync_session(true);
        assert_eq!(favorites.items().len(), 1);

        favorites.sync_session(false);
        assert!(favorites.items().is_empty());
        assert!(open(&storage).items().is_empty());
    }

    #[test]
    fn test_remove() {
        let storage = Arc::new(MemoryStore::new());
        let mut favorites = open(&storage);
        favorites.toggle(Favorite::new("a", "A", "a.png"));
        assert!(favorites.remove("a"));
        assert!(!favorites.remove("a"));
    }

    #[test]
    fn test_reads_catalog_shape() {
        let storage = Arc::new(MemoryStore::with_slot(
            FAVORITES_SLOT,
            r#"[{"_id":"f1","name":"Fern","price":12.5,"imageUrl":"f.png","rating":"4.5/5"},
                {"_id":"f2","name":"Cactus","imageUrl":"c.png","rating":4}]"#,
        ));
        let favorites = open(&storage);
        assert_eq!(favorites.items()[0].price, Some(Decimal::new(125, 1)));
        assert_eq!(favorites.items()[0].rating, Some(Rating::Text("4.5/5".to_string())));
        assert_eq!(favorites.items()[1].rating, Some(Rating::Score(4.0)));
        assert_eq!(favorites.items()[1].price, None);
    }

    #[test]
    fn test_save_failure_is_recorded() {
        // Room for the slot name and an empty list only.
        let storage = Arc::new(MemoryStore::with_quota(FAVORITES_SLOT.len() + 2));
        let mut favorites = open(&storage);

        assert!(favorites.toggle(Favorite::new("marg", "Margherita", "m.png")));
        assert!(favorites.is_favorite(Some("marg")));
        assert!(matches!(
            favorites.last_persist_error(),
            Some(PersistError::Storage(StorageError::QuotaExceeded { .. }))
        ));
        assert_eq!(storage.get(FAVORITES_SLOT).unwrap(), None);

        assert!(!favorites.toggle(Favorite::new("marg", "Margherita", "m.png")));
        assert!(favorites.last_persist_error().is_none());
        assert_eq!(storage.get(FAVORITES_SLOT).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_take_persist_error() {
        let storage = Arc::new(MemoryStore::with_quota(8));
        let mut favorites = open(&storage);
        favorites.toggle(Favorite::new("a", "A", "a.png"));
        assert!(favorites.take_persist_error().is_some());
        assert!(favorites.last_persist_error().is_none());
    }

    #[test]
    fn test_corrupt_slot_opens_empty() {
        let storage = Arc::new(MemoryStore::with_slot(FAVORITES_SLOT, "nope"));
        assert!(open(&storage).items().is_empty());
    }
}
