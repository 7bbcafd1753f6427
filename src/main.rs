//! swapdesk entry point
//!
//! Loads configuration, performs one price refresh and logs a summary of
//! the resulting snapshot.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use swapdesk::config::AppConfig;
use swapdesk::service::SwapService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(config = %config.digest(), "Starting swapdesk");

    let service = SwapService::from_config(&config);
    service
        .refresh_prices()
        .await
        .context("Initial price refresh failed")?;

    let currencies = service.list_currencies();
    info!(
        currencies = currencies.len(),
        rates = service.exchange_rates().len(),
        "Snapshot ready"
    );

    // Log a sample quote for the first available pair
    if let [from, to, ..] = currencies.as_slice() {
        match service.quote_conversion(&from.symbol, &to.symbol, 1.0) {
            Some(quote) => info!(
                from = %from.symbol,
                to = %to.symbol,
                rate = quote.rate,
                minimum_received = quote.minimum_received,
                "Sample quote"
            ),
            None => warn!(
                from = %from.symbol,
                to = %to.symbol,
                "Sample quote unavailable"
            ),
        }
    }

    Ok(())
}
