//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the default currency (USD).
    #[must_use]
    pub fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = round_to_cents(self.amount);
        format!("{}{rounded:.2}", self.currency_code.symbol())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Round an amount to two decimal places, halves away from zero.
///
/// Matches `Math.round(x * 100) / 100` for the non-negative amounts menus use.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Cut an amount to the digits a JSON number keeps.
///
/// Snapshots store money as JSON numbers, which are IEEE doubles. This
/// returns the amount a stored value reads back as: the shortest decimal
/// form of the nearest double. Applying it twice changes nothing. Returns
/// `None` if that double lies outside the `Decimal` range.
#[must_use]
pub fn to_json_precision(amount: Decimal) -> Option<Decimal> {
    let float = amount.to_string().parse::<f64>().ok()?;
    Decimal::from_str(&float.to_string()).ok()
}

/// Serde adapter storing a `Decimal` as a JSON number.
///
/// The written double is the correctly rounded value of the amount, so
/// anything already cut by [`to_json_precision`] reads back unchanged.
///
/// ```rust
/// # use rust_decimal::Decimal;
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Line {
///     #[serde(with = "pizzeria_core::types::price::json_number")]
///     price: Decimal,
/// }
/// ```
pub mod json_number {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    ///
    /// Fails only if the amount's text form is not a number, which
    /// `Decimal` never produces.
    pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let float = amount.to_string().parse::<f64>().map_err(S::Error::custom)?;
        serializer.serialize_f64(float)
    }

    /// # Errors
    ///
    /// Fails if the value is not a number or lies outside the `Decimal` range.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let float = f64::deserialize(deserializer)?;
        Decimal::from_str(&float.to_string()).map_err(D::Error::custom)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// The ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(Price::usd(Decimal::new(235, 1)).display(), "$23.50");
        assert_eq!(Price::usd(Decimal::ZERO).display(), "$0.00");
        assert_eq!(
            Price::new(Decimal::new(1999, 2), CurrencyCode::GBP).to_string(),
            "£19.99"
        );
    }

    #[test]
    fn test_round_to_cents_half_up() {
        assert_eq!(round_to_cents(Decimal::new(10_005, 3)), Decimal::new(1001, 2));
        assert_eq!(round_to_cents(Decimal::new(1_234, 3)), Decimal::new(123, 2));
    }

    #[test]
    fn test_json_precision_keeps_short_amounts() {
        for amount in [Decimal::new(1299, 2), Decimal::new(5, 1), Decimal::from(1_000_000)] {
            assert_eq!(to_json_precision(amount), Some(amount));
        }
    }

    #[test]
    fn test_json_precision_is_stable() {
        let long = Decimal::from_str("12.345678901234567891").unwrap();
        let cut = to_json_precision(long).unwrap();
        assert_ne!(cut, long);
        assert_eq!(to_json_precision(cut), Some(cut));
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stored(#[serde(with = "json_number")] Decimal);

    #[test]
    fn test_json_number_reads_back_cut_amounts() {
        for raw in ["12.345678901234567891", "0.1", "19.99", "1000000000000000000000000000"] {
            let cut = to_json_precision(Decimal::from_str(raw).unwrap()).unwrap();
            let json = serde_json::to_string(&Stored(cut)).unwrap();
            assert_eq!(serde_json::from_str::<Stored>(&json).unwrap(), Stored(cut), "{raw}");
        }
        assert_eq!(serde_json::to_string(&Stored(Decimal::new(1299, 2))).unwrap(), "12.99");
        assert_eq!(serde_json::from_str::<Stored>("3").unwrap(), Stored(Decimal::from(3)));
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::USD);
        assert_eq!(CurrencyCode::EUR.code(), "EUR");
        assert_eq!(CurrencyCode::AUD.symbol(), "$");
    }
}
