//! Values derived from the cart lines.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::item::LineItem;

/// Subtotal and unit count of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Σ price × quantity.
    pub subtotal: Decimal,
    /// Σ quantity.
    pub total_quantity: u64,
}

impl Totals {
    /// Compute totals over a list of lines.
    ///
    /// No sign checks are made on prices; negative input yields negative
    /// subtotals. Sums saturate at the `Decimal` bounds instead of
    /// overflowing.
    #[must_use]
    pub fn compute(items: &[LineItem]) -> Self {
        items.iter().fold(Self::default(), |acc, item| Self {
            subtotal: acc.subtotal.saturating_add(item.line_total()),
            total_quantity: acc.total_quantity.saturating_add(u64::from(item.quantity)),
        })
    }
}
