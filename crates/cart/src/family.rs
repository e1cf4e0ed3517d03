//! Product-family quantity controls.
//!
//! A product card shows one quantity for a menu item even when the cart holds
//! several sizes of it. The card's minus/plus buttons act on the family's
//! last line in cart order (the oldest size added).
//!
//! Minus follows a single policy: a line at quantity 1 is removed with an
//! explicit remove, anything larger is decremented. Decrement itself never
//! removes.

use crate::item::LineItem;
use crate::key::is_family_member;
use crate::persistence::CartPersistence;
use crate::store::CartStore;

/// Lines belonging to the family of `base`, in cart order.
pub fn family_entries<'a>(
    items: &'a [LineItem],
    base: &'a str,
    sized: bool,
) -> impl Iterator<Item = &'a LineItem> + 'a {
    items
        .iter()
        .filter(move |item| is_family_member(item.product_id.as_str(), base, sized))
}

/// Total units of the family of `base` in the cart.
#[must_use]
pub fn family_quantity(items: &[LineItem], base: &str, sized: bool) -> u64 {
    family_entries(items, base, sized)
        .map(|item| u64::from(item.quantity))
        .sum()
}

fn last_entry<'a>(items: &'a [LineItem], base: &'a str, sized: bool) -> Option<&'a LineItem> {
    family_entries(items, base, sized).last()
}

impl<P: CartPersistence> CartStore<P> {
    /// Units of the family of `base` currently in the cart.
    #[must_use]
    pub fn family_quantity(&self, base: &str, sized: bool) -> u64 {
        family_quantity(self.items(), base, sized)
    }

    /// Minus button: take one unit off the family's last line.
    ///
    /// Removes the line when it is at quantity 1. Returns `false` if the
    /// family is not in the cart.
    pub fn step_down(&mut self, base: &str, sized: bool) -> bool {
        let Some(last) = last_entry(self.items(), base, sized) else {
            return false;
        };
        let key = last.key.clone();
        if last.quantity <= 1 {
            self.remove(key.as_str())
        } else {
            self.decrement(key.as_str())
        }
    }

    /// Plus button: add one unit to the family's last line.
    ///
    /// Returns `false` if the family is not in the cart; the caller then
    /// adds the product (or asks for a size first).
    pub fn step_up(&mut self, base: &str, sized: bool) -> bool {
        let Some(key) = last_entry(self.items(), base, sized).map(|last| last.key.clone()) else {
            return false;
        };
        self.increment(key.as_str())
    }
}
