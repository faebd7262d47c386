use crate::config::PricingConfig;
use crate::engine::premium::PremiumCalculator;
use crate::error::PricingResult;
use crate::feeds::SharedPriceSource;
use crate::types::SpreadResult;
use tracing::{debug, info};

/// Fetches one spot price and prices the near and far calls against it.
pub struct SpreadService {
    source: SharedPriceSource,
    config: PricingConfig,
    calculator: PremiumCalculator,
}

impl SpreadService {
    pub fn new(source: SharedPriceSource, config: PricingConfig) -> Self {
        Self {
            source,
            calculator: PremiumCalculator::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub async fn quote(&self) -> PricingResult<SpreadResult> {
        let quote = self.source.spot_price().await?;
        debug!("Spot {} {} @ {}", quote.asset, quote.currency, quote.price);

        let result = self.spread_for_spot(quote.price)?;
        info!(
            "Spread for {} @ {:.4}: {:.6} - {:.6} = {:.6}",
            quote.asset,
            result.spot_price,
            result.premium_at_ratio_low,
            result.premium_at_ratio_high,
            result.spread
        );
        Ok(result)
    }

    /// Pure part of `quote`: both premiums and their difference for a given spot.
    pub fn spread_for_spot(&self, spot: f64) -> PricingResult<SpreadResult> {
        let low = self
            .calculator
            .premium_for_ratio(spot, self.config.low_strike_ratio, self.config.volatility)?;
        let high = self
            .calculator
            .premium_for_ratio(spot, self.config.high_strike_ratio, self.config.volatility)?;

        Ok(SpreadResult::new(spot, low, high))
    }
}
