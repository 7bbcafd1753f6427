//! Configuration management for swapdesk
//!
//! Loads from YAML files + environment variables via .env

mod types;

pub use types::*;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::feed::DEFAULT_FEED_URL;
use crate::swap::SwapFees;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub swap: SwapFees,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Price feed endpoint
    pub url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Feed defaults
            .set_default("feed.url", DEFAULT_FEED_URL)?
            .set_default("feed.timeout_ms", 10_000)?
            // Swap defaults
            .set_default("swap.commission_usd", 2.48)?
            .set_default("swap.slippage_fraction", 0.01)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (SWAPDESK_*)
            .add_source(Environment::with_prefix("SWAPDESK").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject parameter combinations the quote math cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.feed.url.is_empty() {
            bail!("feed.url must not be empty");
        }
        if self.swap.commission_usd < 0.0 {
            bail!(
                "swap.commission_usd must be >= 0 (got {})",
                self.swap.commission_usd
            );
        }
        if !(0.0..1.0).contains(&self.swap.slippage_fraction) {
            bail!(
                "swap.slippage_fraction must be in [0, 1) (got {})",
                self.swap.slippage_fraction
            );
        }
        Ok(())
    }

    /// Generate a digest of the config for logging
    pub fn digest(&self) -> String {
        format!(
            "feed={} timeout_ms={} commission_usd={:.2} slippage={:.2}%",
            self.feed.url,
            self.feed.timeout_ms,
            self.swap.commission_usd,
            self.swap.slippage_fraction * 100.0
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig {
                url: DEFAULT_FEED_URL.to_string(),
                timeout_ms: 10_000,
            },
            swap: SwapFees::default(),
        }
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}
