use crate::config::PricingConfig;
use crate::engine::black_scholes::BlackScholes;
use crate::error::PricingResult;
use crate::types::{ensure_positive, OptionParameters};

/// Prices a call struck at a multiple of spot, with tenor and rate fixed by config.
#[derive(Debug, Clone, Copy)]
pub struct PremiumCalculator {
    tenor_years: f64,
    risk_free_rate: f64,
}

impl PremiumCalculator {
    pub fn new(tenor_years: f64, risk_free_rate: f64) -> Self {
        Self {
            tenor_years,
            risk_free_rate,
        }
    }

    pub fn from_config(config: &PricingConfig) -> Self {
        Self::new(config.tenor_years(), config.risk_free_rate)
    }

    pub fn premium_for_ratio(&self, spot: f64, strike_ratio: f64, volatility: f64) -> PricingResult<f64> {
        ensure_positive("spot", spot)?;
        ensure_positive("strike ratio", strike_ratio)?;

        let params = OptionParameters::new(
            spot,
            spot * strike_ratio,
            self.tenor_years,
            volatility,
            self.risk_free_rate,
        )?;
        BlackScholes::call_price(&params)
    }
}

impl Default for PremiumCalculator {
    fn default() -> Self {
        Self::from_config(&PricingConfig::default())
    }
}
