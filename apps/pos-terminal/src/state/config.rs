//! # Configuration State
//!
//! Stores terminal configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     IBSTOCK_STORE_NAME="Loja Central"                                  │
//! │     IBSTOCK_RECEIPT_SEED=42                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $IBSTOCK_CONFIG, or pos.toml in the platform config dir:           │
//! │     ~/.config/ibstock-pos/pos.toml (Linux)                             │
//! │     ~/Library/Application Support/com.ibstock.pos/pos.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     MZN, "MT", 2 decimals, random receipts                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pos.toml
//! store_name = "IBStock Maputo"
//! currency_code = "MZN"
//! currency_symbol = "MT"
//! currency_decimals = 2
//! receipt_seed = 42          # optional: repeatable receipt numbers
//! log_filter = "info,ibstock=debug"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use ibstock_core::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "IBSTOCK_CONFIG";

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,ibstock=debug";

/// Largest `currency_decimals` accepted from any source.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Terminal configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Store name (shown in the header and on the sale confirmation)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Seed for receipt numbers; `None` draws from OS entropy
    pub receipt_seed: Option<u64>,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "IBStock"
    /// - Currency: MZN (MT), 2 decimals
    /// - Receipts: random
    fn default() -> Self {
        ConfigState {
            store_name: "IBStock".to_string(),
            currency_code: "MZN".to_string(),
            currency_symbol: "MT".to_string(),
            currency_decimals: 2,
            receipt_seed: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file and environment.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path)
        {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                ConfigState::default()
            }
            None => ConfigState::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads a TOML file; keys it omits keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ConfigState = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(invalid(
                "currency_decimals",
                &config.currency_decimals.to_string(),
            ));
        }
        Ok(config)
    }

    /// Applies `IBSTOCK_*` overrides from `lookup`.
    ///
    /// ## Environment Variables
    /// - `IBSTOCK_STORE_NAME`
    /// - `IBSTOCK_CURRENCY_CODE`
    /// - `IBSTOCK_CURRENCY_SYMBOL`
    /// - `IBSTOCK_CURRENCY_DECIMALS` (0-4)
    /// - `IBSTOCK_RECEIPT_SEED`
    /// - `IBSTOCK_LOG`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("IBSTOCK_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(code) = lookup("IBSTOCK_CURRENCY_CODE") {
            self.currency_code = code;
        }

        if let Some(symbol) = lookup("IBSTOCK_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("IBSTOCK_CURRENCY_DECIMALS") {
            self.currency_decimals = raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|d| *d <= MAX_CURRENCY_DECIMALS)
                .ok_or_else(|| invalid("IBSTOCK_CURRENCY_DECIMALS", &raw))?;
        }

        if let Some(raw) = lookup("IBSTOCK_RECEIPT_SEED") {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("IBSTOCK_RECEIPT_SEED", &raw))?;
            self.receipt_seed = Some(seed);
        }

        if let Some(filter) = lookup("IBSTOCK_LOG") {
            self.log_filter = filter;
        }

        Ok(())
    }

    /// `pos.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ibstock", "pos")
            .map(|dirs| dirs.config_dir().join("pos.toml"))
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use ibstock_core::Money;
    /// use ibstock_terminal::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(12_345)), "123.45 MT");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        // Money always carries centavos; rescale for other precisions.
        // i128 holds any i64 amount at up to four decimals.
        let decimals = u32::from(self.currency_decimals.min(MAX_CURRENCY_DECIMALS));
        let cents = i128::from(amount.cents());
        let scaled = match decimals {
            2 => cents,
            d if d > 2 => cents * 10_i128.pow(d - 2),
            d => cents / 10_i128.pow(2 - d),
        };

        let divisor = 10_i128.pow(decimals);
        let whole = (scaled / divisor).abs();
        let frac = (scaled % divisor).abs();
        let sign = if scaled < 0 { "-" } else { "" };

        let number = if decimals > 0 {
            format!("{whole}.{frac:0width$}", width = decimals as usize)
        } else {
            whole.to_string()
        };

        format!("{sign}{number} {}", self.currency_symbol)
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_major(100)), "100.00 MT");
        assert_eq!(config.format_currency(Money::from_cents(1)), "0.01 MT");
        assert_eq!(config.format_currency(Money::zero()), "0.00 MT");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-12.34 MT");
    }

    #[test]
    fn test_format_currency_other_precisions() {
        let mut config = ConfigState::default();
        config.currency_decimals = 0;
        assert_eq!(config.format_currency(Money::from_cents(12_345)), "123 MT");

        config.currency_decimals = 3;
        assert_eq!(config.format_currency(Money::from_cents(12_345)), "123.450 MT");
    }

    #[test]
    fn test_file_keeps_defaults_for_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store_name = \"Loja Central\"\nreceipt_seed = 7").unwrap();

        let config = ConfigState::from_file(file.path()).unwrap();
        assert_eq!(config.store_name, "Loja Central");
        assert_eq!(config.receipt_seed, Some(7));
        assert_eq!(config.currency_symbol, "MT");
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "currency_decimals = \"two\"").unwrap();

        assert!(matches!(
            ConfigState::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_file_decimals_out_of_range() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "currency_decimals = 30").unwrap();

        let err = ConfigState::from_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, ref value } if key == "currency_decimals" && value == "30"
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "currency_decimals = 4").unwrap();
        let config = ConfigState::from_file(file.path()).unwrap();
        assert_eq!(config.format_currency(Money::from_major(100)), "100.0000 MT");
    }

    #[test]
    fn test_format_currency_extremes() {
        let config = ConfigState {
            currency_decimals: 4,
            ..ConfigState::default()
        };
        assert_eq!(
            config.format_currency(Money::from_cents(i64::MAX)),
            "92233720368547758.0700 MT"
        );

        // Out-of-range precision built in code falls back to the maximum.
        let config = ConfigState {
            currency_decimals: 30,
            ..ConfigState::default()
        };
        assert_eq!(config.format_currency(Money::from_major(1)), "1.0000 MT");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.currency_code, "MZN");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = ConfigState {
            store_name: "From File".to_string(),
            ..ConfigState::default()
        };
        config
            .apply_overrides(env(&[
                ("IBSTOCK_STORE_NAME", "From Env"),
                ("IBSTOCK_RECEIPT_SEED", "99"),
                ("IBSTOCK_CURRENCY_SYMBOL", "MZN"),
            ]))
            .unwrap();

        assert_eq!(config.store_name, "From Env");
        assert_eq!(config.receipt_seed, Some(99));
        assert_eq!(config.currency_symbol, "MZN");
    }

    #[test]
    fn test_invalid_env_values() {
        let mut config = ConfigState::default();
        assert!(matches!(
            config.apply_overrides(env(&[("IBSTOCK_RECEIPT_SEED", "abc")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(config
            .apply_overrides(env(&[("IBSTOCK_CURRENCY_DECIMALS", "9")]))
            .is_err());
    }
}
