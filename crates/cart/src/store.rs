//! The cart store: state, persistence and cached totals in one owner.
//!
//! [`CartStore`] is constructed once per application instance and passed by
//! reference to whatever drives the cart. It is the only writer of its
//! [`CartState`]; every change goes through [`CartStore::dispatch`].
//!
//! After a transition that changed the lines, the store saves a snapshot.
//! Save failures never roll back or block the in-memory change: they are
//! logged and kept in [`CartStore::last_persist_error`], and the session
//! carries on in memory.

use std::cell::OnceCell;

use pizzeria_core::{CartKey, MenuItem};
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::error::PersistError;
use crate::item::{AddItem, LineItem};
use crate::key::derive_key;
use crate::persistence::{CartPersistence, JsonSlot};
use crate::sizes::ProductKind;
use crate::state::{CartAction, CartState};
use crate::totals::Totals;

/// Outcome of [`CartStore::quick_add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAdd {
    /// One unit was added.
    Added,
    Unchanged,
    /// The item is sold in sizes and needs one picked first.
    NeedsSize(ProductKind),
}

/// Cart state owner with an injected persistence backend.
#[derive(Debug)]
pub struct CartStore<P: CartPersistence = JsonSlot> {
    state: CartState,
    persistence: P,
    totals: OnceCell<Totals>,
    last_persist_error: Option<PersistError>,
}

impl<P: CartPersistence> CartStore<P> {
    /// Open the store, loading the last snapshot (or an empty cart).
    pub fn open(persistence: P) -> Self {
        let state = persistence.load();
        debug!(lines = state.len(), "Cart loaded");
        Self {
            state,
            persistence,
            totals: OnceCell::new(),
            last_persist_error: None,
        }
    }

    /// Apply an action, persisting the result if the lines changed.
    ///
    /// Returns `true` if the lines changed.
    #[instrument(skip_all, fields(action = action.name()))]
    pub fn dispatch(&mut self, action: CartAction) -> bool {
        if !self.state.apply(action) {
            debug!("Cart unchanged");
            return false;
        }

        self.totals = OnceCell::new();
        match self.persistence.save(&self.state) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!(error = %e, "Failed to persist cart, continuing in memory");
                self.last_persist_error = Some(e);
            }
        }
        true
    }

    /// Add a product (see [`CartAction::Add`]).
    pub fn add(&mut self, item: AddItem) -> bool {
        self.dispatch(CartAction::Add(item))
    }

    /// Add one unit of a menu item straight from its card.
    ///
    /// Pizzas and drinks are not added: they go through a size choice, see
    /// [`size_options`](crate::sizes::size_options).
    pub fn quick_add(&mut self, item: &MenuItem) -> QuickAdd {
        if let Some(kind) = ProductKind::of_menu_item(item) {
            debug!(id = %item.id, %kind, "Quick add needs a size");
            return QuickAdd::NeedsSize(kind);
        }
        if self.add(AddItem::from_menu_item(item)) {
            QuickAdd::Added
        } else {
            QuickAdd::Unchanged
        }
    }

    /// Remove the line with `key`.
    pub fn remove(&mut self, key: &str) -> bool {
        self.dispatch(CartAction::Remove {
            key: CartKey::new(key),
        })
    }

    /// Remove the variant-less line of a product.
    pub fn remove_product(&mut self, product_id: &str) -> bool {
        self.dispatch(CartAction::Remove {
            key: derive_key(product_id, None),
        })
    }

    /// Overwrite a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, key: &str, quantity: f64) -> bool {
        self.dispatch(CartAction::SetQuantity {
            key: CartKey::new(key),
            quantity,
        })
    }

    pub fn increment(&mut self, key: &str) -> bool {
        self.dispatch(CartAction::Increment {
            key: CartKey::new(key),
        })
    }

    /// Lower a line's quantity by one. A line at quantity 1 is left alone;
    /// use [`remove`](Self::remove) to take it out.
    pub fn decrement(&mut self, key: &str) -> bool {
        self.dispatch(CartAction::Decrement {
            key: CartKey::new(key),
        })
    }

    pub fn clear(&mut self) -> bool {
        self.dispatch(CartAction::Clear)
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Lines in display order (newest first).
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LineItem> {
        self.state.get(key)
    }

    /// Subtotal and unit count, computed once per change.
    #[must_use]
    pub fn totals(&self) -> Totals {
        *self.totals.get_or_init(|| Totals::compute(self.state.items()))
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.totals().subtotal
    }

    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.totals().total_quantity
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

    /// The persistence backend.
    #[must_use]
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }
}
