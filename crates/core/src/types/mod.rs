//! Core types for Pizzeria.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod menu;
pub mod price;

pub use category::{Category, CategoryError};
pub use id::*;
pub use menu::{ApiItem, MenuImage, MenuItem};
pub use price::{CurrencyCode, Price, round_to_cents, to_json_precision};
