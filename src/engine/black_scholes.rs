use crate::engine::normal::normal_cdf;
use crate::error::{PricingResult, SpreadError};
use crate::types::OptionParameters;

pub struct BlackScholes;

impl BlackScholes {
    /// Fair value of a European call.
    /// C = S * N(d1) - K * e^(-r * T) * N(d2)
    /// where d1 = [ln(S/K) + (r + 0.5 * sigma^2) * T] / (sigma * sqrt(T))
    ///       d2 = d1 - sigma * sqrt(T)
    pub fn call_price(params: &OptionParameters) -> PricingResult<f64> {
        params.validate()?;

        let OptionParameters {
            spot,
            strike,
            tenor,
            volatility,
            risk_free_rate: rate,
        } = *params;

        let sigma_sqrt_t = volatility * tenor.sqrt();
        let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility.powi(2)) * tenor) / sigma_sqrt_t;
        let d2 = d1 - sigma_sqrt_t;

        let price = spot * normal_cdf(d1) - strike * (-rate * tenor).exp() * normal_cdf(d2);

        if !price.is_finite() {
            return Err(SpreadError::domain(format!(
                "call price is not finite for {:?}",
                params
            )));
        }
        Ok(price)
    }
}
