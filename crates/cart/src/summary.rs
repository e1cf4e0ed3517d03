//! Order summary shown beside the cart.

use pizzeria_core::{CurrencyCode, Price};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::totals::Totals;

/// Default flat delivery fee.
pub const DEFAULT_DELIVERY_FEE: Decimal = Decimal::from_parts(299, 0, 0, false, 2);

/// Subtotal, delivery fee and grand total of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
    /// Units in the cart.
    pub item_count: u64,
}

impl OrderSummary {
    /// Build a summary from cart totals.
    ///
    /// The delivery fee is flat and charged even for an empty cart. The total
    /// saturates at the `Decimal` bounds.
    #[must_use]
    pub fn new(totals: Totals, delivery_fee: Decimal, currency: CurrencyCode) -> Self {
        Self {
            subtotal: Price::new(totals.subtotal, currency),
            delivery_fee: Price::new(delivery_fee, currency),
            total: Price::new(totals.subtotal.saturating_add(delivery_fee), currency),
            item_count: totals.total_quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delivery_fee() {
        assert_eq!(DEFAULT_DELIVERY_FEE, Decimal::new(299, 2));
    }

    #[test]
    fn test_summary_adds_delivery_fee() {
        let totals = Totals {
            subtotal: Decimal::new(235, 1),
            total_quantity: 3,
        };
        let summary = OrderSummary::new(totals, DEFAULT_DELIVERY_FEE, CurrencyCode::USD);
        assert_eq!(summary.subtotal.display(), "$23.50");
        assert_eq!(summary.delivery_fee.display(), "$2.99");
        assert_eq!(summary.total.display(), "$26.49");
        assert_eq!(summary.item_count, 3);
    }

    #[test]
    fn test_empty_cart_summary() {
        let summary = OrderSummary::new(Totals::default(), Decimal::ZERO, CurrencyCode::EUR);
        assert_eq!(summary.total.display(), "€0.00");
        assert_eq!(summary.item_count, 0);
    }

    #[test]
    fn test_total_saturates() {
        let totals = Totals {
            subtotal: Decimal::MAX,
            total_quantity: 1,
        };
        let summary = OrderSummary::new(totals, DEFAULT_DELIVERY_FEE, CurrencyCode::USD);
        assert_eq!(summary.total.amount, Decimal::MAX);
    }
}
