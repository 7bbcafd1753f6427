//! Core types used throughout swapdesk
//!
//! Defines common data structures for price observations, currencies,
//! exchange rates and conversion quotes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped price record for a currency, as delivered by the feed.
///
/// Several observations may exist for the same currency; arrival order is
/// not guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Currency symbol (e.g. "BTC")
    pub currency: String,
    /// When the price was observed
    pub timestamp: DateTime<Utc>,
    /// USD price at that time
    pub price: f64,
}

/// Current price for a single currency, derived from the observation set.
///
/// Exactly one instance exists per distinct symbol, always reflecting the
/// observation with the latest timestamp for that symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    /// Unique symbol (e.g. "ETH")
    pub symbol: String,
    /// Current USD price (positive, finite)
    pub price: f64,
    /// Timestamp of the winning observation
    pub last_updated: DateTime<Utc>,
}

/// Directed exchange rate for one ordered currency pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency symbol
    pub from: String,
    /// Destination currency symbol
    pub to: String,
    /// Units of `to` per unit of `from` (`from_price / to_price`)
    pub rate: f64,
    /// USD price of the source currency
    pub from_price: f64,
    /// USD price of the destination currency
    pub to_price: f64,
}

/// Result of evaluating one conversion request. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionQuote {
    /// Amount sent, in source currency units
    pub source_amount: f64,
    /// Amount received before fees, in destination currency units
    pub dest_amount: f64,
    /// Exchange rate applied
    pub rate: f64,
    /// Flat commission in USD
    pub commission: f64,
    /// USD value of the source amount after commission
    pub total_expected: f64,
    /// Guaranteed minimum proceeds in USD after the slippage margin
    pub minimum_received: f64,
}

impl ConversionQuote {
    /// Quote for a zero or unparsable source amount: the rate is still
    /// reported but every amount-derived field stays at zero.
    pub fn empty(rate: f64, commission: f64) -> Self {
        Self {
            source_amount: 0.0,
            dest_amount: 0.0,
            rate,
            commission,
            total_expected: 0.0,
            minimum_received: 0.0,
        }
    }
}
