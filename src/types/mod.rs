use crate::error::{PricingResult, SpreadError};
use serde::Serialize;

/// A single spot observation from the price source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub asset: String,
    pub currency: String,
    pub price: f64,
}

impl PriceQuote {
    pub fn new(asset: impl Into<String>, currency: impl Into<String>, price: f64) -> PricingResult<Self> {
        let asset = asset.into();
        if !price.is_finite() || price <= 0.0 {
            return Err(SpreadError::domain(format!(
                "spot price for {} must be positive and finite, got {}",
                asset, price
            )));
        }
        Ok(Self {
            asset,
            currency: currency.into(),
            price,
        })
    }
}

/// Inputs to a single European call valuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionParameters {
    pub spot: f64,
    pub strike: f64,
    pub tenor: f64,
    pub volatility: f64,
    pub risk_free_rate: f64,
}

impl OptionParameters {
    pub fn new(spot: f64, strike: f64, tenor: f64, volatility: f64, risk_free_rate: f64) -> PricingResult<Self> {
        let params = Self {
            spot,
            strike,
            tenor,
            volatility,
            risk_free_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Rejects anything that would make `d1`/`d2` non-finite.
    pub fn validate(&self) -> PricingResult<()> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;
        ensure_positive("tenor", self.tenor)?;
        ensure_positive("volatility", self.volatility)?;
        if !self.risk_free_rate.is_finite() {
            return Err(SpreadError::domain(format!(
                "risk-free rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        Ok(())
    }
}

pub(crate) fn ensure_positive(name: &str, value: f64) -> PricingResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SpreadError::domain(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

/// Outcome of one spread computation. Field names on the wire are fixed by the
/// front-end contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpreadResult {
    #[serde(rename = "solanaPrice")]
    pub spot_price: f64,
    #[serde(rename = "premium120")]
    pub premium_at_ratio_low: f64,
    #[serde(rename = "premium200")]
    pub premium_at_ratio_high: f64,
    #[serde(rename = "finalPremium")]
    pub spread: f64,
}

impl SpreadResult {
    pub fn new(spot_price: f64, premium_at_ratio_low: f64, premium_at_ratio_high: f64) -> Self {
        Self {
            spot_price,
            premium_at_ratio_low,
            premium_at_ratio_high,
            spread: premium_at_ratio_low - premium_at_ratio_high,
        }
    }
}
