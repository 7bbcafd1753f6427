//! Custom error types for the swap service
//!
//! Provides structured, typed errors instead of generic Box<dyn Error>

use thiserror::Error;

/// Errors raised while fetching or rebuilding the price snapshot.
///
/// Any of these aborts the whole refresh; the previous snapshot stays in
/// place. Lookups by unknown symbol are not errors and return `None`.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Price feed returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Invalid price {price} for {currency}")]
    InvalidPriceData { currency: String, price: f64 },

    #[error("Cannot derive rates against zero-priced currency {symbol}")]
    DivisionByZero { symbol: String },
}

impl FeedError {
    /// Whether the failure came from the transport rather than the payload.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, FeedError::Http { .. } | FeedError::Network(_))
    }
}
