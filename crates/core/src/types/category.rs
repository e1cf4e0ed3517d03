//! Menu categories.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown category name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid menu category: {0}")]
pub struct CategoryError(pub String);

/// A section of the menu.
///
/// Serialized in lowercase, the same way the menu API and cart `type` tags
/// spell them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pizza,
    Pasta,
    Sides,
    Dessert,
    Drinks,
}

impl Category {
    /// Every category, in menu display order.
    pub const ALL: [Self; 5] = [
        Self::Pizza,
        Self::Pasta,
        Self::Sides,
        Self::Dessert,
        Self::Drinks,
    ];

    /// Lowercase name used in tags and URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pizza => "pizza",
            Self::Pasta => "pasta",
            Self::Sides => "sides",
            Self::Dessert => "dessert",
            Self::Drinks => "drinks",
        }
    }

    /// Path of the menu API collection for this category.
    #[must_use]
    pub const fn api_path(&self) -> &'static str {
        match self {
            Self::Pizza => "/api/pizzas",
            Self::Pasta => "/api/pasta",
            Self::Sides => "/api/sides",
            Self::Dessert => "/api/desserts",
            Self::Drinks => "/api/drinks",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pizza" => Ok(Self::Pizza),
            "pasta" => Ok(Self::Pasta),
            "sides" => Ok(Self::Sides),
            "dessert" => Ok(Self::Dessert),
            "drinks" => Ok(Self::Drinks),
            _ => Err(CategoryError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_rejects_unknown() {
        let err = "all".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "invalid menu category: all");
    }

    #[test]
    fn test_category_api_paths() {
        assert_eq!(Category::Pizza.api_path(), "/api/pizzas");
        assert_eq!(Category::Dessert.api_path(), "/api/desserts");
        assert_eq!(Category::Drinks.to_string(), "drinks");
    }
}
