// src/config.rs
//
// TOML configuration for the server, the upstream price source and the
// pricing parameters. Every field has a default so an empty file is valid.

use crate::types::ensure_positive;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    pub server: ServerConfig,
    pub price_source: PriceSourceConfig,
    pub pricing: PricingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig::default(),
            price_source: PriceSourceConfig::default(),
            pricing: PricingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origin allowed to call the API (None = cross-origin requests refused)
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
            allowed_origin: Some("http://localhost:3000".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceSourceConfig {
    /// Base URL of a CoinGecko-compatible API
    pub base_url: String,
    /// Asset id as the API names it, e.g. "solana"
    pub asset_id: String,
    /// Quote currency, e.g. "usd"
    pub vs_currency: String,
    /// Upper bound on a single upstream request, in milliseconds
    pub timeout_ms: u64,
}

impl Default for PriceSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            asset_id: "solana".to_string(),
            vs_currency: "usd".to_string(),
            timeout_ms: 5_000,
        }
    }
}

impl PriceSourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Parameters of the two synthetic calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Strike of the near call as a multiple of spot
    pub low_strike_ratio: f64,
    /// Strike of the far call as a multiple of spot
    pub high_strike_ratio: f64,
    /// Annualized volatility
    pub volatility: f64,
    /// Calendar days to expiry
    pub tenor_days: f64,
    pub risk_free_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            low_strike_ratio: 1.2,
            high_strike_ratio: 2.0,
            volatility: 0.75,
            tenor_days: 30.0,
            risk_free_rate: 0.04,
        }
    }
}

impl PricingConfig {
    /// Tenor as a year fraction on a 365-day year.
    pub fn tenor_years(&self) -> f64 {
        self.tenor_days / 365.0
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("low_strike_ratio", self.low_strike_ratio)?;
        ensure_positive("high_strike_ratio", self.high_strike_ratio)?;
        ensure_positive("volatility", self.volatility)?;
        ensure_positive("tenor_days", self.tenor_days)?;
        anyhow::ensure!(
            self.risk_free_rate.is_finite(),
            "risk_free_rate must be finite, got {}",
            self.risk_free_rate
        );
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.pricing.validate().context("Invalid [pricing] section")?;
        anyhow::ensure!(
            self.price_source.timeout_ms > 0,
            "price_source.timeout_ms must be greater than zero"
        );
        anyhow::ensure!(
            !self.price_source.asset_id.is_empty() && !self.price_source.vs_currency.is_empty(),
            "price_source.asset_id and price_source.vs_currency must be set"
        );
        anyhow::ensure!(
            self.server.allowed_origin.as_deref() != Some("*"),
            "server.allowed_origin must name one origin; credentials rule out \"*\""
        );
        Ok(())
    }
}

/// Returns the default configuration rendered as TOML.
pub fn default_config_template() -> Result<String> {
    let body = toml::to_string_pretty(&Config::default()).context("Failed to render default config")?;
    Ok(format!("# premium-spread configuration\n\n{}", body))
}
