//! Cart line items and add requests.

use pizzeria_core::{CartKey, MenuItem, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One purchasable row in the cart.
///
/// Serialized with the browser snapshot field names (`productId`,
/// `imagePath`, `variantKey`, `type`); absent optionals are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Derived identity, unique within the cart.
    pub key: CartKey,
    pub product_id: ProductId,
    pub name: String,
    /// Unit price.
    #[serde(with = "pizzeria_core::types::price::json_number")]
    pub price: Decimal,
    pub image_path: String,
    /// Always at least 1 while the line is in the cart.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_key: Option<String>,
    /// Free-form category tag (e.g. `pizza`, `drinks`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl LineItem {
    /// Price of the whole line (`price × quantity`), saturating at the
    /// `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Request to add a product to the cart.
///
/// The product id may come from `productId` or, failing that, `id`; a
/// request carrying neither is ignored by the cart. `quantity` is the raw
/// number the caller asked for and is normalized on add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub name: String,
    #[serde(with = "pizzeria_core::types::price::json_number")]
    pub price: Decimal,
    #[serde(default)]
    pub image_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_key: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl AddItem {
    /// Start an add request for a product.
    #[must_use]
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: None,
            product_id: Some(product_id.into()),
            name: name.into(),
            price,
            image_path: String::new(),
            quantity: None,
            variant_key: None,
            kind: None,
        }
    }

    /// Quick-add request for an unsized menu item.
    ///
    /// Tagged with the item's category.
    #[must_use]
    pub fn from_menu_item(item: &MenuItem) -> Self {
        Self::new(item.product_id(), item.name.clone(), item.price)
            .with_image(item.image.thumbnail())
            .with_quantity(1.0)
            .with_kind(item.category.as_str())
    }

    #[must_use]
    pub const fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    #[must_use]
    pub fn with_variant(mut self, variant_key: impl Into<String>) -> Self {
        self.variant_key = Some(variant_key.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = image_path.into();
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// The product id this request resolves to, if any.
    ///
    /// A non-empty `productId` wins over a non-empty `id`.
    #[must_use]
    pub fn resolved_product_id(&self) -> Option<&str> {
        self.product_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.id.as_deref().filter(|id| !id.is_empty()))
    }

    /// The requested quantity, floored and clamped to at least 1.
    #[must_use]
    pub fn normalized_quantity(&self) -> u32 {
        clamp_quantity(self.quantity.unwrap_or(1.0), 1)
    }
}

/// Floor a raw quantity and clamp it to `[min, u32::MAX]`.
///
/// Non-finite input maps to `min`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_quantity(raw: f64, min: u32) -> u32 {
    if !raw.is_finite() {
        return min;
    }
    // `as` saturates for out-of-range floats.
    (raw.floor().max(0.0) as u32).max(min)
}
