use crate::config::PriceSourceConfig;
use crate::error::{PricingResult, SpreadError};
use crate::feeds::PriceSource;
use crate::types::PriceQuote;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// A `simple/price` answer for one asset is a few dozen bytes.
const MAX_BODY_BYTES: usize = 16 * 1024;
/// Longest body prefix written to the debug log.
const LOG_PREFIX_CHARS: usize = 256;

/// Spot price from the CoinGecko `simple/price` endpoint.
pub struct CoinGeckoSource {
    client: Client,
    api_url: String,
    asset_id: String,
    vs_currency: String,
}

impl CoinGeckoSource {
    pub fn new(config: &PriceSourceConfig) -> PricingResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SpreadError::upstream(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.base_url.trim_end_matches('/').to_string(),
            asset_id: config.asset_id.clone(),
            vs_currency: config.vs_currency.clone(),
        })
    }

    async fn fetch_body(&self) -> PricingResult<String> {
        let url = format!("{}/simple/price", self.api_url);

        let mut resp = self
            .client
            .get(&url)
            .query(&[("ids", &self.asset_id), ("vs_currencies", &self.vs_currency)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SpreadError::upstream(format!(
                "Price source returned {} for {}",
                status, url
            )));
        }

        if let Some(len) = resp.content_length() {
            if len > MAX_BODY_BYTES as u64 {
                return Err(SpreadError::shape(format!(
                    "Price source body of {} bytes exceeds {} byte limit",
                    len, MAX_BODY_BYTES
                )));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await? {
            if body.len() + chunk.len() > MAX_BODY_BYTES {
                return Err(SpreadError::shape(format!(
                    "Price source body exceeds {} byte limit",
                    MAX_BODY_BYTES
                )));
            }
            body.extend_from_slice(&chunk);
        }

        String::from_utf8(body).map_err(|e| SpreadError::shape(format!("Price source body is not UTF-8: {}", e)))
    }
}

#[async_trait]
impl PriceSource for CoinGeckoSource {
    async fn spot_price(&self) -> PricingResult<PriceQuote> {
        let body = self.fetch_body().await?;
        debug!("Price source body: {}", log_prefix(&body));
        let price = extract_price(&body, &self.asset_id, &self.vs_currency)?;
        PriceQuote::new(&self.asset_id, &self.vs_currency, price)
    }
}

fn log_prefix(body: &str) -> &str {
    match body.char_indices().nth(LOG_PREFIX_CHARS) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// Pulls `body[asset][currency]` out of a `simple/price` payload.
pub fn extract_price(body: &str, asset_id: &str, vs_currency: &str) -> PricingResult<f64> {
    let v: Value = serde_json::from_str(body)
        .map_err(|e| SpreadError::shape(format!("Price source body is not JSON: {}", e)))?;

    let quote = v
        .get(asset_id)
        .and_then(Value::as_object)
        .ok_or_else(|| SpreadError::shape(format!("Missing object '{}'", asset_id)))?;

    let price = quote
        .get(vs_currency)
        .and_then(Value::as_f64)
        .ok_or_else(|| SpreadError::shape(format!("Missing numeric '{}.{}'", asset_id, vs_currency)))?;

    Ok(price)
}
