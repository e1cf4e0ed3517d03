//! Command implementations.
//!
//! Each command takes the store it acts on and a writer for its output, so
//! the binary binds them to the file-backed slots and stdout while tests use
//! an in-memory store and a buffer.

use std::sync::Arc;

use pizzeria_cart::{FileStore, KeyValueStore};

use crate::config::CliConfig;

pub mod cart;
pub mod favorites;

/// Result type shared by all commands.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Storage backend for the configured data directory.
pub fn open_storage(config: &CliConfig) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::new(&config.data_dir))
}
