//! Pizzeria Cart - Client-side shopping cart.
//!
//! This crate holds the storefront's cart: a small state machine over cart
//! lines, the snapshot persistence that keeps the cart across sessions, and
//! the aggregates shown beside it.
//!
//! # Architecture
//!
//! ```text
//! CartStore ──dispatch──▶ CartState::apply ──▶ CartPersistence::save
//!     │                                               │
//!     └── totals (cached)                   JsonSlot ─▶ KeyValueStore
//!                                                       ├── MemoryStore
//!                                                       └── FileStore
//! ```
//!
//! # Modules
//!
//! - [`key`] - Cart key derivation and size families
//! - [`item`] - Cart lines and add requests
//! - [`state`] - Actions and the transition function
//! - [`store`] - The cart owner: dispatch, persistence, cached totals
//! - [`persistence`] - Snapshot load/save over a storage slot
//! - [`storage`] - Key-value storage backends
//! - [`totals`] / [`summary`] - Subtotal, unit count and order summary
//! - [`family`] / [`sizes`] - Product card controls and size options
//! - [`favorites`] - Saved favorite products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod family;
pub mod favorites;
pub mod item;
pub mod key;
pub mod persistence;
pub mod sizes;
pub mod state;
pub mod storage;
pub mod store;
pub mod summary;
pub mod totals;

pub use error::{PersistError, Result, StorageError};
pub use favorites::{Favorite, FavoritesStore, Rating};
pub use item::{AddItem, LineItem};
pub use key::derive_key;
pub use persistence::{CART_SLOT, CartPersistence, FAVORITES_SLOT, JsonSlot};
pub use sizes::{ProductKind, SizeOption, size_options};
pub use state::{CartAction, CartState, reduce};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{CartStore, QuickAdd};
pub use summary::{DEFAULT_DELIVERY_FEE, OrderSummary};
pub use totals::Totals;
