//! Integration tests for the Pizzeria cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pizzeria-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Behavioral guarantees of the cart state machine,
//!   exercised through the public store API
//! - `cart_persistence` - Snapshots on disk: reopen, corrupt slots, quota,
//!   favorites sharing a data directory
//!
//! Tests need no external services; file-backed cases use temporary
//! directories.
