//! Rates module - price normalization and the exchange-rate table
//!
//! Reduces raw feed observations to one current price per currency and
//! derives the directed exchange rate for every ordered currency pair.

use std::collections::HashMap;

use crate::error::FeedError;
use crate::types::{Currency, ExchangeRate, PriceObservation};

/// Collapse raw observations into one `Currency` per distinct symbol.
///
/// The observation with the latest timestamp wins; on an exact timestamp
/// tie the first observation seen is kept. Symbols appear in first-seen
/// order. Any non-positive or non-finite price fails the whole batch.
pub fn normalize_prices(observations: &[PriceObservation]) -> Result<Vec<Currency>, FeedError> {
    let mut order: Vec<String> = Vec::new();
    let mut latest: HashMap<String, &PriceObservation> = HashMap::new();

    for obs in observations {
        if !obs.price.is_finite() || obs.price <= 0.0 {
            return Err(FeedError::InvalidPriceData {
                currency: obs.currency.clone(),
                price: obs.price,
            });
        }

        match latest.get(obs.currency.as_str()) {
            Some(current) => {
                // Strictly later replaces; equal timestamps keep first-seen
                if obs.timestamp > current.timestamp {
                    latest.insert(obs.currency.clone(), obs);
                }
            }
            None => {
                order.push(obs.currency.clone());
                latest.insert(obs.currency.clone(), obs);
            }
        }
    }

    Ok(order
        .iter()
        .map(|symbol| {
            let obs = latest[symbol.as_str()];
            Currency {
                symbol: obs.currency.clone(),
                price: obs.price,
                last_updated: obs.timestamp,
            }
        })
        .collect())
}

/// All-pairs exchange-rate table over a currency snapshot.
///
/// Holds exactly n*(n-1) entries in double-loop order (outer = from,
/// inner = to) plus an index for O(1) pair lookup.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: Vec<ExchangeRate>,
    index: HashMap<String, HashMap<String, f64>>,
}

impl RateTable {
    /// Compute the rate for every ordered pair of distinct currencies.
    ///
    /// A zero-priced currency fails with `DivisionByZero` even though
    /// ingestion already rejects it upstream.
    pub fn build(currencies: &[Currency]) -> Result<Self, FeedError> {
        let mut rates = Vec::with_capacity(currencies.len().saturating_sub(1) * currencies.len());
        let mut index: HashMap<String, HashMap<String, f64>> = HashMap::new();

        for from in currencies {
            for to in currencies {
                if from.symbol == to.symbol {
                    continue;
                }
                if to.price == 0.0 {
                    return Err(FeedError::DivisionByZero {
                        symbol: to.symbol.clone(),
                    });
                }
                let rate = from.price / to.price;
                rates.push(ExchangeRate {
                    from: from.symbol.clone(),
                    to: to.symbol.clone(),
                    rate,
                    from_price: from.price,
                    to_price: to.price,
                });
                index
                    .entry(from.symbol.clone())
                    .or_default()
                    .insert(to.symbol.clone(), rate);
            }
        }

        Ok(Self { rates, index })
    }

    /// Look up the rate for an ordered pair.
    ///
    /// `None` when `from == to` or either symbol is absent from the
    /// snapshot; never an error.
    pub fn get_rate(&self, from: &str, to: &str) -> Option<f64> {
        self.index.get(from)?.get(to).copied()
    }

    /// All entries in insertion order.
    pub fn rates(&self) -> &[ExchangeRate] {
        &self.rates
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
