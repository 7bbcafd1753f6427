//! Price feed clients
//!
//! Fetches raw spot prices from the external feed endpoint. The feed is a
//! single read-only GET returning `[{currency, date, price}]` records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::FeedError;
use crate::types::PriceObservation;

/// Default price feed endpoint.
pub const DEFAULT_FEED_URL: &str = "https://interview.switcheo.com/prices.json";

/// Wire format of one feed record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPrice {
    pub currency: String,
    pub date: DateTime<Utc>,
    pub price: f64,
}

impl From<RawPrice> for PriceObservation {
    fn from(raw: RawPrice) -> Self {
        PriceObservation {
            currency: raw.currency,
            timestamp: raw.date,
            price: raw.price,
        }
    }
}

/// Source of raw price observations.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Fetch the full observation set. One call per refresh; no retry.
    async fn fetch_prices(&self) -> Result<Vec<PriceObservation>, FeedError>;
}

/// HTTP client for the JSON price feed.
pub struct HttpPriceFeed {
    client: Client,
    url: String,
}

impl HttpPriceFeed {
    /// Create a new feed client against `url` with the given timeout.
    pub fn new(url: &str, timeout_ms: u64) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    async fn fetch_prices(&self) -> Result<Vec<PriceObservation>, FeedError> {
        tracing::debug!(url = %self.url, "Fetching spot prices");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let raw: Vec<RawPrice> = serde_json::from_str(&body)?;

        tracing::debug!(count = raw.len(), "Received price observations");
        Ok(raw.into_iter().map(PriceObservation::from).collect())
    }
}
