//! Pizzeria Core - Shared types library.
//!
//! This crate provides common types used across all Pizzeria components:
//! - `pizzeria-cart` - Client-side cart state, persistence and favorites
//! - `pz-cli` - Command-line front end for the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, prices, menu categories and
//!   menu items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
