//! Cart line identity.
//!
//! A line's [`CartKey`] is its product id, plus `::<variant>` when a variant
//! was chosen. Two adds of the same product and variant always collide on the
//! same key; a different (or missing) variant never does.
//!
//! Sized products use a second, independent convention: the size is baked
//! into the product id itself as `"<base>|<size>"`. Everything sharing the
//! `"<base>|"` prefix is one product *family*, which is how quantity controls
//! on a product card find all sizes of that product in the cart.

use pizzeria_core::{CartKey, ProductId};

/// Separator between product id and variant in a [`CartKey`].
pub const VARIANT_SEPARATOR: &str = "::";

/// Separator between a base product id and a size label.
pub const FAMILY_SEPARATOR: char = '|';

/// Derive the cart key for a product and optional variant.
///
/// An empty variant is treated the same as no variant.
#[must_use]
pub fn derive_key(product_id: &str, variant_key: Option<&str>) -> CartKey {
    match variant_key.filter(|v| !v.is_empty()) {
        Some(variant) => CartKey::new(format!("{product_id}{VARIANT_SEPARATOR}{variant}")),
        None => CartKey::new(product_id),
    }
}

/// Product id of one size of a base product: `"<base>|<size>"`.
#[must_use]
pub fn sized_product_id(base: &str, size: &str) -> ProductId {
    ProductId::new(format!("{base}{FAMILY_SEPARATOR}{size}"))
}

/// Whether `product_id` belongs to the family of `base`.
///
/// Sized families match on the `"<base>|"` prefix; unsized products match
/// only on exact equality.
#[must_use]
pub fn is_family_member(product_id: &str, base: &str, sized: bool) -> bool {
    if sized {
        product_id
            .strip_prefix(base)
            .is_some_and(|rest| rest.starts_with(FAMILY_SEPARATOR))
    } else {
        product_id == base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_without_variant_is_product_id() {
        assert_eq!(derive_key("p1", None), "p1");
        assert_eq!(derive_key("p1", Some("")), "p1");
    }

    #[test]
    fn test_key_with_variant() {
        assert_eq!(derive_key("p1", Some("large")), "p1::large");
    }

    #[test]
    fn test_key_is_deterministic() {
        assert_eq!(derive_key("p1", Some("v")), derive_key("p1", Some("v")));
        assert_eq!(derive_key("p1", None), derive_key("p1", None));
    }

    #[test]
    fn test_variant_presence_changes_key() {
        assert_ne!(derive_key("p1", None), derive_key("p1", Some("v")));
        assert_ne!(derive_key("p1", Some("a")), derive_key("p1", Some("b")));
    }

    #[test]
    fn test_sized_product_id() {
        assert_eq!(sized_product_id("marg", "Large"), "marg|Large");
    }

    #[test]
    fn test_family_membership_sized() {
        assert!(is_family_member("marg|Small", "marg", true));
        assert!(is_family_member("marg|Large (0.7 L)", "marg", true));
        assert!(!is_family_member("marg", "marg", true));
        assert!(!is_family_member("margherita|Small", "marg", true));
        assert!(!is_family_member("other|Small", "marg", true));
    }

    #[test]
    fn test_family_membership_unsized() {
        assert!(is_family_member("garlic-bread", "garlic-bread", false));
        assert!(!is_family_member("garlic-bread|Small", "garlic-bread", false));
    }
}
