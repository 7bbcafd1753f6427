//! Swap service
//!
//! Owns the Currency/ExchangeRate snapshot, the loading/error state and
//! the swap history. Constructed once at startup and passed by reference
//! to consumers. Snapshots are rebuilt wholesale on every refresh and
//! replaced atomically; readers always observe either the previous or the
//! next complete snapshot, never a mix.

use std::sync::RwLock;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::FeedError;
use crate::feed::{HttpPriceFeed, PriceFeed};
use crate::history::{SwapHistory, SwapRecord, SwapStatus};
use crate::rates::{normalize_prices, RateTable};
use crate::swap::{quote_conversion, SwapFees};
use crate::types::{ConversionQuote, Currency, ExchangeRate};
use crate::wallet::{display_balances, DisplayBalance, WalletBalance};

/// Fully-consistent view of the feed at one point in time.
#[derive(Debug, Default)]
struct FeedState {
    currencies: Vec<Currency>,
    rates: RateTable,
    loading: bool,
    error: Option<String>,
}

/// Service facade over the price snapshot.
pub struct SwapService<F: PriceFeed> {
    feed: F,
    fees: SwapFees,
    state: RwLock<FeedState>,
    /// Serializes refreshes; a second refresh queues behind the first
    refresh_gate: tokio::sync::Mutex<()>,
    history: RwLock<SwapHistory>,
}

impl SwapService<HttpPriceFeed> {
    /// Build the service with the HTTP feed from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            HttpPriceFeed::new(&config.feed.url, config.feed.timeout_ms),
            config.swap,
        )
    }
}

impl<F: PriceFeed> SwapService<F> {
    pub fn new(feed: F, fees: SwapFees) -> Self {
        Self {
            feed,
            fees,
            state: RwLock::new(FeedState::default()),
            refresh_gate: tokio::sync::Mutex::new(()),
            history: RwLock::new(SwapHistory::new()),
        }
    }

    /// Re-fetch the feed and recompute the snapshot.
    ///
    /// Any failure leaves the previous snapshot in place and records the
    /// error for `last_error`. No automatic retry.
    pub async fn refresh_prices(&self) -> Result<(), FeedError> {
        let _gate = self.refresh_gate.lock().await;

        {
            let mut state = self.state.write().unwrap();
            state.loading = true;
        }

        let result = self.rebuild().await;

        let mut state = self.state.write().unwrap();
        state.loading = false;
        match result {
            Ok((currencies, rates)) => {
                info!(
                    currencies = currencies.len(),
                    rates = rates.len(),
                    "Price snapshot replaced"
                );
                state.currencies = currencies;
                state.rates = rates;
                state.error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Price refresh failed; keeping previous snapshot");
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn rebuild(&self) -> Result<(Vec<Currency>, RateTable), FeedError> {
        let observations = self.feed.fetch_prices().await?;
        let currencies = normalize_prices(&observations)?;
        let rates = RateTable::build(&currencies)?;
        Ok((currencies, rates))
    }

    /// Whether a refresh is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().loading
    }

    /// Message from the last failed refresh; cleared on success.
    pub fn last_error(&self) -> Option<String> {
        self.state.read().unwrap().error.clone()
    }

    pub fn list_currencies(&self) -> Vec<Currency> {
        self.state.read().unwrap().currencies.clone()
    }

    pub fn exchange_rates(&self) -> Vec<ExchangeRate> {
        self.state.read().unwrap().rates.rates().to_vec()
    }

    pub fn get_currency_by_symbol(&self, symbol: &str) -> Option<Currency> {
        self.state
            .read()
            .unwrap()
            .currencies
            .iter()
            .find(|c| c.symbol == symbol)
            .cloned()
    }

    /// Rate for an ordered pair; `None` for self-pairs and unknown symbols.
    pub fn get_exchange_rate(&self, from: &str, to: &str) -> Option<f64> {
        self.state.read().unwrap().rates.get_rate(from, to)
    }

    /// Quote a conversion against the current snapshot.
    ///
    /// `None` when the pair is unavailable (same symbol on both sides, or
    /// either symbol unknown); a zero amount yields an empty quote.
    pub fn quote_conversion(&self, from: &str, to: &str, amount: f64) -> Option<ConversionQuote> {
        let state = self.state.read().unwrap();
        let rate = state.rates.get_rate(from, to)?;
        let from_currency = state.currencies.iter().find(|c| c.symbol == from)?;
        Some(quote_conversion(from_currency, rate, amount, &self.fees))
    }

    /// Record an executed swap in the session history.
    pub fn record_swap(
        &self,
        from: &str,
        to: &str,
        quote: &ConversionQuote,
        status: SwapStatus,
    ) -> SwapRecord {
        self.history.write().unwrap().record(from, to, quote, status)
    }

    /// Swap records, newest first.
    pub fn history(&self) -> Vec<SwapRecord> {
        self.history.read().unwrap().all().to_vec()
    }

    pub fn get_swap(&self, id: &str) -> Option<SwapRecord> {
        self.history.read().unwrap().get(id).cloned()
    }

    pub fn swaps_for_currency(&self, symbol: &str) -> Vec<SwapRecord> {
        self.history.read().unwrap().for_currency(symbol)
    }

    pub fn clear_history(&self) {
        self.history.write().unwrap().clear();
    }

    /// Order and value wallet balances against the current snapshot.
    pub fn display_balances(&self, balances: &[WalletBalance]) -> Vec<DisplayBalance> {
        let state = self.state.read().unwrap();
        display_balances(balances, |symbol| {
            state
                .currencies
                .iter()
                .find(|c| c.symbol == symbol)
                .map(|c| c.price)
        })
    }
}
