//! TOML configuration for the ledger, the sticker collection and logging.
//!
//! Every section is optional and falls back to its `Default`. Environment
//! overrides (`SWAP_MARKET_LEDGER_ACCOUNT`, `RUST_LOG`) apply after the file
//! is parsed; call [`MarketConfig::validate`] once they are in.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;
use crate::types::amount::to_fixed;
use crate::types::{AccountId, CollectionId, ZERO_ACCOUNT};

#[derive(Debug, Deserialize, Clone, Serialize, Default)]
pub struct MarketConfig {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub issuance: IssuanceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct LedgerConfig {
    /// Account the ledger presents to the registry as mover
    pub account: AccountId,
    /// Pre-allocated offer slots
    pub capacity: usize,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct IssuanceConfig {
    pub collection: CollectionId,
    pub owner: AccountId,
    /// Decimal string, e.g. "0.01"
    pub mint_fee: String,
    pub token_uris: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// "full" or "compact"
    pub format: Option<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            account: 1_000,
            capacity: 1_024,
        }
    }
}

impl Default for IssuanceConfig {
    fn default() -> Self {
        Self {
            collection: 1,
            owner: 1,
            mint_fee: "0.01".to_string(),
            token_uris: vec![
                "ipfs://messi".to_string(),
                "ipfs://dimaria".to_string(),
                "ipfs://dibu".to_string(),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Some("full".to_string()),
        }
    }
}

impl MarketConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_str = std::fs::read_to_string(path)?;
        let config: MarketConfig = toml::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_with_env_overrides<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `SWAP_MARKET_LEDGER_ACCOUNT` and `RUST_LOG` if set
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(account) = std::env::var("SWAP_MARKET_LEDGER_ACCOUNT") {
            self.ledger.account = account
                .trim()
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("SWAP_MARKET_LEDGER_ACCOUNT: {}", e)))?;
        }

        if let Ok(log_level) = std::env::var("RUST_LOG") {
            self.logging.level = log_level;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.account == ZERO_ACCOUNT {
            return Err(ConfigError::Invalid("Ledger account cannot be zero".to_string()));
        }

        if self.issuance.owner == ZERO_ACCOUNT {
            return Err(ConfigError::Invalid("Collection owner cannot be zero".to_string()));
        }

        if self.issuance.token_uris.is_empty() {
            return Err(ConfigError::Invalid("At least one token URI is required".to_string()));
        }

        if to_fixed(&self.issuance.mint_fee).is_none() {
            return Err(ConfigError::Invalid(format!(
                "Mint fee is not a valid amount: {}",
                self.issuance.mint_fee
            )));
        }

        match self.logging.format.as_deref() {
            None | Some("full") | Some("compact") => {}
            Some(other) => {
                return Err(ConfigError::Invalid(format!("Unknown log format: {}", other)));
            }
        }

        Ok(())
    }

    /// Write the default configuration as TOML
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(&MarketConfig::default())?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` wins over the configured level. Returns `false` if a subscriber
/// was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match config.format.as_deref() {
        Some("compact") => builder.compact().try_init(),
        _ => builder.try_init(),
    };
    installed.is_ok()
}
