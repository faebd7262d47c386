//! Error types for the premium spread pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpreadError {
    /// Transport failure or non-success status from the price source.
    #[error("Upstream fetch error: {0}")]
    UpstreamFetch(String),

    /// The price source answered, but not with `{ <asset>: { <currency>: number } }`.
    #[error("Unexpected response shape: {0}")]
    UnexpectedResponseShape(String),

    /// A pricing input is outside the model's domain.
    #[error("Domain error: {0}")]
    Domain(String),
}

pub type PricingResult<T> = Result<T, SpreadError>;

impl SpreadError {
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamFetch(msg.into())
    }

    pub fn shape(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponseShape(msg.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    /// Short stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpstreamFetch(_) => "upstream_fetch",
            Self::UnexpectedResponseShape(_) => "unexpected_response_shape",
            Self::Domain(_) => "domain",
        }
    }
}

impl From<reqwest::Error> for SpreadError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::shape(e.to_string())
        } else {
            Self::upstream(e.to_string())
        }
    }
}
