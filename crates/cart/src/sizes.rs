//! Size options for pizzas and drinks.
//!
//! Sized products are priced off the menu price: small at 80%, medium at
//! 100%, large at 120%, rounded to cents. Each size goes into the cart as its
//! own product id, `"<base>|<size label>"`.

use pizzeria_core::{MenuItem, round_to_cents};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::AddItem;
use crate::key::sized_product_id;

/// Products that are sold in sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Pizza,
    Drinks,
}

impl ProductKind {
    /// Detect a sized product from its category tag, falling back to its
    /// image path.
    ///
    /// Category wins: containing `pizza` means a pizza, starting with `drink`
    /// means drinks. Otherwise the image path is checked for `pizza` and then
    /// `drink`, the later match taking precedence.
    #[must_use]
    pub fn detect(category: &str, image_path: &str) -> Option<Self> {
        let category = category.to_lowercase();
        if category.contains("pizza") {
            return Some(Self::Pizza);
        }
        if category.starts_with("drink") {
            return Some(Self::Drinks);
        }

        let path = image_path.to_lowercase();
        if path.contains("drink") {
            Some(Self::Drinks)
        } else if path.contains("pizza") {
            Some(Self::Pizza)
        } else {
            None
        }
    }

    /// Detect from a menu item's category and thumbnail.
    #[must_use]
    pub fn of_menu_item(item: &MenuItem) -> Option<Self> {
        Self::detect(item.category.as_str(), item.image.thumbnail())
    }

    /// Cart `type` tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pizza => "pizza",
            Self::Drinks => "drinks",
        }
    }

    const fn labels(self) -> [&'static str; 3] {
        match self {
            Self::Pizza => ["Small", "Medium", "Large"],
            Self::Drinks => ["Small (0.3 L)", "Medium (0.5 L)", "Large (0.7 L)"],
        }
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pizza" => Ok(Self::Pizza),
            "drinks" => Ok(Self::Drinks),
            _ => Err(format!("invalid product kind: {s}")),
        }
    }
}

/// One selectable size and its price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Small, medium and large options for a product priced at `base_price`.
///
/// Prices saturate at the `Decimal` bounds.
#[must_use]
pub fn size_options(kind: ProductKind, base_price: Decimal) -> Vec<SizeOption> {
    let multipliers = [Decimal::new(8, 1), Decimal::ONE, Decimal::new(12, 1)];
    kind.labels()
        .into_iter()
        .zip(multipliers)
        .map(|(label, multiplier)| SizeOption {
            label: label.to_string(),
            price: if multiplier == Decimal::ONE {
                base_price
            } else {
                round_to_cents(base_price.saturating_mul(multiplier))
            },
        })
        .collect()
}

impl AddItem {
    /// Add request for one size of a product.
    ///
    /// Product id `"<base>|<label>"`, name `"<name> (<label>)"`, quantity 1.
    #[must_use]
    pub fn sized(
        base_product_id: &str,
        name: &str,
        image_path: &str,
        kind: ProductKind,
        option: &SizeOption,
    ) -> Self {
        Self::new(
            sized_product_id(base_product_id, &option.label),
            format!("{name} ({})", option.label),
            option.price,
        )
        .with_image(image_path)
        .with_quantity(1.0)
        .with_kind(kind.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_category() {
        assert_eq!(ProductKind::detect("Pizza", ""), Some(ProductKind::Pizza));
        assert_eq!(ProductKind::detect("veggie-pizza", ""), Some(ProductKind::Pizza));
        assert_eq!(ProductKind::detect("drinks", "pizza.png"), Some(ProductKind::Drinks));
        assert_eq!(ProductKind::detect("soft-drinks", ""), None);
    }

    #[test]
    fn test_detect_from_image_path() {
        assert_eq!(ProductKind::detect("", "/img/Pizza/marg.png"), Some(ProductKind::Pizza));
        assert_eq!(ProductKind::detect("", "/img/drinks/cola.png"), Some(ProductKind::Drinks));
        assert_eq!(
            ProductKind::detect("", "/img/pizza-drink-combo.png"),
            Some(ProductKind::Drinks)
        );
        assert_eq!(ProductKind::detect("sides", "/img/bread.png"), None);
    }

    #[test]
    fn test_pizza_size_prices() {
        let options = size_options(ProductKind::Pizza, Decimal::TEN);
        let prices: Vec<_> = options.iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![Decimal::new(8, 0), Decimal::TEN, Decimal::new(12, 0)]);
        assert_eq!(options[0].label, "Small");
        assert_eq!(options[2].label, "Large");
    }

    #[test]
    fn test_size_prices_round_to_cents() {
        let options = size_options(ProductKind::Drinks, Decimal::new(1199, 2));
        assert_eq!(options[0].label, "Small (0.3 L)");
        assert_eq!(options[0].price, Decimal::new(959, 2)); // 9.592
        assert_eq!(options[1].price, Decimal::new(1199, 2));
        assert_eq!(options[2].price, Decimal::new(1439, 2)); // 14.388
    }

    #[test]
    fn test_size_prices_saturate() {
        let options = size_options(ProductKind::Pizza, Decimal::MAX);
        assert_eq!(options[1].price, Decimal::MAX);
        assert_eq!(options[2].price, round_to_cents(Decimal::MAX));
        assert!(options[0].price < Decimal::MAX);
    }

    #[test]
    fn test_sized_add_item() {
        let option = &size_options(ProductKind::Pizza, Decimal::TEN)[2];
        let item = AddItem::sized("marg", "Margherita", "m.png", ProductKind::Pizza, option);

        assert_eq!(item.resolved_product_id(), Some("marg|Large"));
        assert_eq!(item.name, "Margherita (Large)");
        assert_eq!(item.price, Decimal::new(12, 0));
        assert_eq!(item.kind.as_deref(), Some("pizza"));
        assert_eq!(item.normalized_quantity(), 1);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("drinks".parse::<ProductKind>().unwrap(), ProductKind::Drinks);
        assert!("pasta".parse::<ProductKind>().is_err());
    }
}
