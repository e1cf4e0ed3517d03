//! Cart state and its transition function.
//!
//! Every change to the cart is a [`CartAction`] applied by [`reduce`]. The
//! transitions are pure and synchronous; persistence and derived totals live
//! one layer up in [`CartStore`](crate::store::CartStore).
//!
//! # Invariants
//!
//! - keys are unique within [`CartState::items`]
//! - every line has `quantity >= 1`
//! - new lines are prepended (newest first); merging never reorders
//! - prices carry no more digits than a snapshot can store, so a saved cart
//!   loads back equal

use pizzeria_core::{CartKey, ProductId, to_json_precision};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::item::{AddItem, LineItem, clamp_quantity};
use crate::key::derive_key;

/// A change to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add a product, merging into an existing line with the same key.
    Add(AddItem),
    /// Delete the line with this key.
    Remove { key: CartKey },
    /// Overwrite a line's quantity; zero or less removes it.
    SetQuantity { key: CartKey, quantity: f64 },
    /// Raise a line's quantity by one.
    Increment { key: CartKey },
    /// Lower a line's quantity by one, never below one.
    Decrement { key: CartKey },
    /// Empty the cart.
    Clear,
}

impl CartAction {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove { .. } => "remove",
            Self::SetQuantity { .. } => "set_quantity",
            Self::Increment { .. } => "increment",
            Self::Decrement { .. } => "decrement",
            Self::Clear => "clear",
        }
    }
}

/// The ordered list of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from previously stored lines.
    ///
    /// Lines with zero quantity, repeats of an earlier key and prices out of
    /// storable range are dropped so the cart invariants hold whatever the
    /// source contained. Prices are cut to storable precision.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut state = Self::new();
        for mut item in items {
            match to_json_precision(item.price) {
                Some(price) if item.quantity > 0 && !state.contains(item.key.as_str()) => {
                    item.price = price;
                    state.items.push(item);
                }
                _ => debug!(key = %item.key, "Dropping invalid stored cart line"),
            }
        }
        state
    }

    /// Lines in display order (newest first).
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the state, returning its lines.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Look up a line by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.key == key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Apply an action in place.
    ///
    /// Returns `true` if the item list changed.
    pub fn apply(&mut self, action: CartAction) -> bool {
        match action {
            CartAction::Add(item) => self.add(item),
            CartAction::Remove { key } => self.remove(key.as_str()),
            CartAction::SetQuantity { key, quantity } => {
                match clamp_quantity(quantity, 0) {
                    0 => self.remove(key.as_str()),
                    qty => self.update(key.as_str(), |line| {
                        let changed = line.quantity != qty;
                        line.quantity = qty;
                        changed
                    }),
                }
            }
            CartAction::Increment { key } => self.update(key.as_str(), |line| {
                let next = line.quantity.saturating_add(1);
                let changed = next != line.quantity;
                line.quantity = next;
                changed
            }),
            CartAction::Decrement { key } => self.update(key.as_str(), |line| {
                if line.quantity > 1 {
                    line.quantity -= 1;
                    true
                } else {
                    false
                }
            }),
            CartAction::Clear => {
                let changed = !self.items.is_empty();
                self.items.clear();
                changed
            }
        }
    }

    fn add(&mut self, item: AddItem) -> bool {
        let Some(product_id) = item.resolved_product_id() else {
            debug!(name = %item.name, "Ignoring add without a product id");
            return false;
        };
        let product_id = product_id.to_owned();

        let quantity = item.normalized_quantity();
        let key = derive_key(&product_id, item.variant_key.as_deref());

        if let Some(existing) = self.items.iter_mut().find(|line| line.key == key) {
            let next = existing.quantity.saturating_add(quantity);
            let changed = next != existing.quantity;
            existing.quantity = next;
            return changed;
        }

        let Some(price) = to_json_precision(item.price) else {
            debug!(name = %item.name, price = %item.price, "Ignoring add with an unstorable price");
            return false;
        };
        let line = LineItem {
            key,
            product_id: ProductId::new(product_id),
            name: item.name,
            price,
            image_path: item.image_path,
            quantity,
            variant_key: item.variant_key,
            kind: item.kind,
        };
        self.items.insert(0, line);
        true
    }

    fn remove(&mut self, key: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.key != key);
        self.items.len() != before
    }

    fn update(&mut self, key: &str, f: impl FnOnce(&mut LineItem) -> bool) -> bool {
        self.items
            .iter_mut()
            .find(|line| line.key == key)
            .is_some_and(f)
    }
}

/// Pure transition: `(state, action) -> state`.
#[must_use]
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    state.apply(action);
    state
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn add(product_id: &str, quantity: f64) -> CartAction {
        CartAction::Add(AddItem::new(product_id, product_id, Decimal::TEN).with_quantity(quantity))
    }

    fn key(s: &str) -> CartKey {
        CartKey::new(s)
    }

    fn quantities(state: &CartState) -> Vec<(&str, u32)> {
        state
            .items()
            .iter()
            .map(|line| (line.key.as_str(), line.quantity))
            .collect()
    }

    #[test]
    fn test_add_merges_by_key() {
        let state = reduce(CartState::new(), add("p1", 1.0));
        let state = reduce(state, add("p1", 2.0));
        assert_eq!(quantities(&state), vec![("p1", 3)]);
    }

    #[test]
    fn test_add_prepends_new_lines() {
        let state = reduce(CartState::new(), add("p1", 1.0));
        let state = reduce(state, add("p2", 1.0));
        let state = reduce(state, add("p1", 1.0));
        assert_eq!(quantities(&state), vec![("p2", 1), ("p1", 2)]);
    }

    #[test]
    fn test_add_without_product_id_is_noop() {
        let mut state = reduce(CartState::new(), add("p1", 1.0));
        let mut item = AddItem::new("", "Mystery", Decimal::ONE);
        item.product_id = None;
        assert!(!state.apply(CartAction::Add(item)));
        assert_eq!(quantities(&state), vec![("p1", 1)]);
    }

    #[test]
    fn test_add_uses_id_fallback() {
        let mut item = AddItem::new("", "Tiramisu", Decimal::new(55, 1));
        item.id = Some("tiramisu".to_string());
        let state = reduce(CartState::new(), CartAction::Add(item));
        assert_eq!(state.items()[0].product_id, "tiramisu");
    }

    #[test]
    fn test_add_clamps_quantity() {
        let state = reduce(CartState::new(), add("neg", -4.0));
        let state = reduce(state, add("frac", 2.9));
        assert_eq!(quantities(&state), vec![("frac", 2), ("neg", 1)]);
    }

    #[test]
    fn test_add_merge_keeps_existing_fields() {
        let state = reduce(CartState::new(), add("p1", 1.0));
        let renamed = AddItem::new("p1", "Renamed", Decimal::ONE);
        let state = reduce(state, CartAction::Add(renamed));
        let line = state.get("p1").expect("line");
        assert_eq!(line.name, "p1");
        assert_eq!(line.price, Decimal::TEN);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_variants_are_distinct_lines() {
        let plain = AddItem::new("cola", "Cola", Decimal::ONE);
        let large = plain.clone().with_variant("large");
        let state = reduce(CartState::new(), CartAction::Add(plain));
        let state = reduce(state, CartAction::Add(large));
        assert_eq!(quantities(&state), vec![("cola::large", 1), ("cola", 1)]);
        assert_eq!(state.items()[0].variant_key.as_deref(), Some("large"));
    }

    #[test]
    fn test_remove() {
        let state = reduce(CartState::new(), add("p1", 1.0));
        let mut state = reduce(state, add("p2", 1.0));
        assert!(state.apply(CartAction::Remove { key: key("p1") }));
        assert!(!state.apply(CartAction::Remove { key: key("p1") }));
        assert_eq!(quantities(&state), vec![("p2", 1)]);
    }

    #[test]
    fn test_set_quantity() {
        let state = reduce(CartState::new(), add("p1", 1.0));
        let state = reduce(
            state,
            CartAction::SetQuantity {
                key: key("p1"),
                quantity: 5.7,
            },
        );
        assert_eq!(quantities(&state), vec![("p1", 5)]);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let state = reduce(CartState::new(), add("p1", 3.0));
        let state = reduce(
            state,
            CartAction::SetQuantity {
                key: key("p1"),
                quantity: 0.0,
            },
        );
        assert!(!state.contains("p1"));

        let state = reduce(state, add("p2", 3.0));
        let state = reduce(
            state,
            CartAction::SetQuantity {
                key: key("p2"),
                quantity: -2.0,
            },
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_set_quantity_absent_key_is_noop() {
        let mut state = reduce(CartState::new(), add("p1", 1.0));
        assert!(!state.apply(CartAction::SetQuantity {
            key: key("missing"),
            quantity: 4.0,
        }));
        assert_eq!(quantities(&state), vec![("p1", 1)]);
    }

    #[test]
    fn test_increment_and_decrement() {
        let state = reduce(CartState::new(), add("p1", 1.0));
        let state = reduce(state, CartAction::Increment { key: key("p1") });
        let state = reduce(state, CartAction::Increment { key: key("p1") });
        assert_eq!(quantities(&state), vec![("p1", 3)]);

        let state = reduce(state, CartAction::Decrement { key: key("p1") });
        assert_eq!(quantities(&state), vec![("p1", 2)]);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut state = reduce(CartState::new(), add("p1", 1.0));
        assert!(!state.apply(CartAction::Decrement { key: key("p1") }));
        assert_eq!(quantities(&state), vec![("p1", 1)]);
    }

    #[test]
    fn test_increment_absent_key_is_noop() {
        let mut state = CartState::new();
        assert!(!state.apply(CartAction::Increment { key: key("nope") }));
        assert!(state.is_empty());
    }

    #[test]
    fn test_clear_is_unconditional() {
        let state = reduce(CartState::new(), add("p1", 1.0));
        let state = reduce(state, add("p2", 4.0));
        let state = reduce(state, CartAction::Clear);
        assert!(state.is_empty());
        assert_eq!(reduce(CartState::new(), CartAction::Clear), CartState::new());
    }

    #[test]
    fn test_from_items_drops_zero_quantity_and_duplicates() {
        let line = |key: &str, quantity| LineItem {
            key: CartKey::new(key),
            product_id: ProductId::new(key),
            name: key.to_string(),
            price: Decimal::ONE,
            image_path: String::new(),
            quantity,
            variant_key: None,
            kind: None,
        };
        let state = CartState::from_items(vec![line("a", 1), line("b", 0), line("a", 4), line("c", 2)]);
        assert_eq!(quantities(&state), vec![("a", 1), ("c", 2)]);
    }

    #[test]
    fn test_add_cuts_price_to_storable_precision() {
        let long: Decimal = "12.345678901234567891".parse().expect("decimal");
        let state = reduce(CartState::new(), CartAction::Add(AddItem::new("p1", "P", long)));
        let price = state.get("p1").expect("line").price;
        assert_ne!(price, long);
        assert_eq!(to_json_precision(price), Some(price));

        let short = reduce(
            CartState::new(),
            CartAction::Add(AddItem::new("p2", "P", Decimal::new(1299, 2))),
        );
        assert_eq!(short.get("p2").expect("line").price, Decimal::new(1299, 2));
    }

    #[test]
    fn test_add_ignores_unstorable_price() {
        let mut state = CartState::new();
        assert!(!state.apply(CartAction::Add(AddItem::new("p1", "P", Decimal::MAX))));
        assert!(state.is_empty());
    }

    #[test]
    fn test_action_json_tags() {
        let json = serde_json::to_value(CartAction::Increment { key: key("p1") }).expect("json");
        assert_eq!(json["action"], "INCREMENT");
        assert_eq!(json["key"], "p1");
        assert_eq!(CartAction::Clear.name(), "clear");
    }
}
