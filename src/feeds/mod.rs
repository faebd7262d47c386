pub mod coingecko;

use crate::error::PricingResult;
use crate::types::PriceQuote;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of the current spot price. One call per request, no caching.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn spot_price(&self) -> PricingResult<PriceQuote>;
}

pub type SharedPriceSource = Arc<dyn PriceSource>;
