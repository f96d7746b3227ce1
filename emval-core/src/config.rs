//! Monetization policy configuration.
//!
//! The carbon price and the EBITDA unit multipliers are process-wide,
//! immutable configuration: they can be loaded from a TOML file but are
//! never part of record data. [`MonetizationConfig::default`] carries the
//! policy values used throughout the published figures.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{EmvalError, EmvalResult};

/// Carbon price proposed by the International Foundation for Valuing
/// Impacts, in US dollars per metric ton of CO2e.
pub const DEFAULT_CARBON_PRICE_USD_PER_TON: f64 = 236.0;

/// Dollars per billion.
pub const BILLION: f64 = 1_000_000_000.0;
/// Dollars per million. Also the number of tons in a million metric tons,
/// which scales MtCO2e emissions to tons before pricing.
pub const MILLION: f64 = 1_000_000.0;

/// Monetization policy: the carbon price and unit multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonetizationConfig {
    /// Price applied to each metric ton of CO2e, in US dollars.
    pub carbon_price_usd_per_ton: f64,
    /// Multiplier normalizing EBITDA reported in billions into dollars.
    pub billion_multiplier: f64,
    /// Multiplier normalizing EBITDA reported in millions into dollars.
    pub million_multiplier: f64,
}

impl Default for MonetizationConfig {
    fn default() -> Self {
        Self {
            carbon_price_usd_per_ton: DEFAULT_CARBON_PRICE_USD_PER_TON,
            billion_multiplier: BILLION,
            million_multiplier: MILLION,
        }
    }
}

impl MonetizationConfig {
    /// Load a configuration from TOML text.
    ///
    /// Missing keys fall back to the defaults, so a partial file that only
    /// overrides the carbon price is valid.
    pub fn from_toml_str(text: &str) -> EmvalResult<Self> {
        let config: MonetizationConfig =
            toml::from_str(text).map_err(|e| EmvalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> EmvalResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> EmvalResult<()> {
        if !self.carbon_price_usd_per_ton.is_finite() || self.carbon_price_usd_per_ton < 0.0 {
            return Err(EmvalError::Config(format!(
                "carbon price must be a non-negative number, got {}",
                self.carbon_price_usd_per_ton
            )));
        }
        for (name, value) in [
            ("billion_multiplier", self.billion_multiplier),
            ("million_multiplier", self.million_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EmvalError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
