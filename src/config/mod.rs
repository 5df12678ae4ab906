//! Configuration management for the dip allocator.
//!
//! Loads settings from an optional `config` file, a `.env` file and
//! `DIP__`-prefixed environment variables (e.g. `DIP__ALLOCATION__LOT_SIZE=100`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Allocation engine settings
    #[serde(default)]
    pub allocation: AllocationConfig,
    /// Output formatting
    #[serde(default)]
    pub display: DisplayConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Shares per board lot
    #[serde(default = "default_lot_size")]
    pub lot_size: u64,
    /// Upper bound on ladder levels accepted from a request
    #[serde(default = "default_max_ladder_levels")]
    pub max_ladder_levels: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Prefix printed before money values
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Decimal places for money values
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Digit grouping character
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for a daily rolling log file (stderr only when unset)
    #[serde(default)]
    pub directory: Option<String>,
    /// Default filter directive when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_lot_size() -> u64 {
    100 // IDX board lot
}

fn default_max_ladder_levels() -> usize {
    1000
}

fn default_currency_symbol() -> String {
    "Rp".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_separator() -> char {
    ','
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment variables and config files.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::default().separator("__").prefix("DIP"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.allocation.lot_size >= 1, "lot_size must be >= 1");

        anyhow::ensure!(
            self.allocation.max_ladder_levels >= 1,
            "max_ladder_levels must be >= 1"
        );

        anyhow::ensure!(
            self.display.decimal_places <= 10,
            "decimal_places must be <= 10"
        );

        Ok(())
    }
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            lot_size: default_lot_size(),
            max_ladder_levels: default_max_ladder_levels(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            level: default_log_level(),
        }
    }
}
