//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `BASKET_STORAGE_DIR` - Directory of the file-backed store (default: .basket)
//! - `BASKET_STORAGE_KEY` - Key the cart record is stored under (default: cartItems)
//! - `BASKET_ADD_POLICY` - How adding an existing product grows its quantity:
//!   `increment` (by one, default) or `merge` (by the added item's quantity)
//! - `BASKET_STORAGE_QUOTA_BYTES` - Maximum size of the stored cart record

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::persistence::DEFAULT_STORAGE_KEY;

const DEFAULT_STORAGE_DIR: &str = ".basket";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How `add` treats a product that is already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddPolicy {
    /// The existing entry grows by exactly one unit.
    #[default]
    IncrementByOne,
    /// The existing entry grows by the added item's quantity.
    MergeQuantity,
}

impl std::fmt::Display for AddPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncrementByOne => write!(f, "increment"),
            Self::MergeQuantity => write!(f, "merge"),
        }
    }
}

impl FromStr for AddPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increment" => Ok(Self::IncrementByOne),
            "merge" => Ok(Self::MergeQuantity),
            _ => Err(format!("invalid add policy: {s} (expected increment or merge)")),
        }
    }
}

/// Cart engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory of the file-backed durable store
    pub storage_dir: PathBuf,
    /// Key the cart record is stored under
    pub storage_key: String,
    /// Behavior of `add` for products already in the cart
    pub add_policy: AddPolicy,
    /// Maximum size of the stored record in bytes
    pub storage_quota_bytes: Option<usize>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            add_policy: AddPolicy::default(),
            storage_quota_bytes: None,
        }
    }
}

impl CartConfig {
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

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage_dir = lookup("BASKET_STORAGE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or(defaults.storage_dir, PathBuf::from);
        let storage_key = lookup("BASKET_STORAGE_KEY")
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(defaults.storage_key);
        let add_policy = lookup("BASKET_ADD_POLICY")
            .map(|value| {
                value.parse::<AddPolicy>().map_err(|e| {
                    ConfigError::InvalidEnvVar("BASKET_ADD_POLICY".to_string(), e)
                })
            })
            .transpose()?
            .unwrap_or(defaults.add_policy);
        let storage_quota_bytes = lookup("BASKET_STORAGE_QUOTA_BYTES")
            .map(|value| {
                value.trim().parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "BASKET_STORAGE_QUOTA_BYTES".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            storage_dir,
            storage_key,
            add_policy,
            storage_quota_bytes,
        })
    }
}
