//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PIZZERIA_DATA_DIR` - Directory holding the cart and favorites slots
//!   (default: `.pizzeria`)
//! - `PIZZERIA_DELIVERY_FEE` - Flat delivery fee added to the order total
//!   (default: 2.99)
//! - `PIZZERIA_LOG_FORMAT` - `text` or `json` (default: text)
//! - `RUST_LOG` - Log filter (default: `pz_cli=info,pizzeria_cart=info`)

use std::path::PathBuf;
use std::str::FromStr;

use pizzeria_cart::DEFAULT_DELIVERY_FEE;
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".pizzeria";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Where slot files are kept
    pub data_dir: PathBuf,
    /// Flat delivery fee for the order summary
    pub delivery_fee: Decimal,
    /// Log output format
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_or_default(&lookup, "PIZZERIA_DATA_DIR", DEFAULT_DATA_DIR));

        let delivery_fee = match lookup("PIZZERIA_DELIVERY_FEE") {
            Some(raw) => parse_fee(&raw)?,
            None => DEFAULT_DELIVERY_FEE,
        };

        let log_format = lookup("PIZZERIA_LOG_FORMAT")
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("PIZZERIA_LOG_FORMAT".to_string(), e))?
            .unwrap_or_default();

        Ok(Self {
            data_dir,
            delivery_fee,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(lookup: impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Parse a non-negative money amount.
fn parse_fee(raw: &str) -> Result<Decimal, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("PIZZERIA_DELIVERY_FEE".to_string(), reason);
    let fee = Decimal::from_str(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if fee.is_sign_negative() {
        return Err(invalid("must not be negative".to_string()));
    }
    Ok(fee)
}
