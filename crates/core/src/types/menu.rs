//! Menu items as served by the menu API.
//!
//! The API returns loosely shaped documents: ids may arrive as `id` or
//! `_id` (or not at all), and images are either a single URL or a set of
//! responsive renditions. [`MenuItem::normalize`] turns an [`ApiItem`] into a
//! record the storefront can rely on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;
use super::id::ProductId;

/// Image reference of a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuImage {
    /// A single image URL.
    Url(String),
    /// Responsive renditions.
    Responsive {
        small: String,
        medium: String,
        large: String,
    },
}

impl MenuImage {
    /// The smallest available rendition, used for cards and cart rows.
    ///
    /// Falls through to larger renditions when a smaller one is blank.
    #[must_use]
    pub fn thumbnail(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Responsive {
                small,
                medium,
                large,
            } => [small, medium, large]
                .into_iter()
                .find(|s| !s.is_empty())
                .map_or("", String::as_str),
        }
    }

    /// The largest available rendition.
    #[must_use]
    pub fn full_size(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Responsive {
                small,
                medium,
                large,
            } => [large, medium, small]
                .into_iter()
                .find(|s| !s.is_empty())
                .map_or("", String::as_str),
        }
    }
}

/// A menu document exactly as the API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: MenuImage,
}

/// A menu item with a guaranteed id and a known category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: MenuImage,
    pub category: Category,
}

impl MenuItem {
    /// Attach a category and settle the item's id.
    ///
    /// The id is `id`, else `_id`, else a fresh random UUID.
    #[must_use]
    pub fn normalize(raw: ApiItem, category: Category) -> Self {
        let id = non_empty(raw.id.as_deref())
            .or_else(|| non_empty(raw.mongo_id.as_deref()))
            .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);

        Self {
            id,
            mongo_id: raw.mongo_id,
            name: raw.name,
            description: raw.description,
            ingredients: raw.ingredients,
            price: raw.price,
            image: raw.image,
            category,
        }
    }

    /// Product id used when this item is put in the cart.
    ///
    /// Prefers `id`, then `_id`, then the item name.
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        let id = non_empty(Some(self.id.as_str()))
            .or_else(|| non_empty(self.mongo_id.as_deref()))
            .unwrap_or(self.name.as_str());
        ProductId::new(id)
    }

    /// Card blurb: description, falling back to the ingredient list.
    #[must_use]
    pub fn blurb(&self) -> Option<&str> {
        non_empty(self.description.as_deref()).or_else(|| non_empty(self.ingredients.as_deref()))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
