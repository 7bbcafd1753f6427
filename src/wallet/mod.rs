//! Wallet balance display helpers
//!
//! Orders multi-chain wallet balances for display and values them in USD
//! against the current price snapshot. Chains are a closed enumeration;
//! balances on unrecognized chains are dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chains a balance can live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    Osmosis,
    Ethereum,
    Arbitrum,
    Zilliqa,
    Neo,
}

/// Priority assigned to balances whose chain is not recognized. Such
/// balances never reach the display list.
pub const UNKNOWN_CHAIN_PRIORITY: i32 = -99;

impl Chain {
    /// Display ordering weight; higher sorts first.
    pub fn priority(&self) -> i32 {
        match self {
            Chain::Osmosis => 100,
            Chain::Ethereum => 50,
            Chain::Arbitrum => 30,
            Chain::Zilliqa => 20,
            Chain::Neo => 20,
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Osmosis" => Some(Chain::Osmosis),
            "Ethereum" => Some(Chain::Ethereum),
            "Arbitrum" => Some(Chain::Arbitrum),
            "Zilliqa" => Some(Chain::Zilliqa),
            "Neo" => Some(Chain::Neo),
            _ => None,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chain::Osmosis => write!(f, "Osmosis"),
            Chain::Ethereum => write!(f, "Ethereum"),
            Chain::Arbitrum => write!(f, "Arbitrum"),
            Chain::Zilliqa => write!(f, "Zilliqa"),
            Chain::Neo => write!(f, "Neo"),
        }
    }
}

/// Priority for a chain identifier that may not name a known chain.
pub fn chain_priority(identifier: &str) -> i32 {
    Chain::from_str(identifier)
        .map(|c| c.priority())
        .unwrap_or(UNKNOWN_CHAIN_PRIORITY)
}

/// Raw wallet balance as reported by an external source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletBalance {
    /// Chain identifier; arbitrary strings are tolerated
    pub blockchain: String,
    /// Currency symbol
    pub currency: String,
    /// Amount held, in currency units
    pub amount: f64,
}

/// Balance prepared for display, ordered and valued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayBalance {
    pub chain: Chain,
    pub currency: String,
    pub amount: f64,
    /// Amount rendered to two decimals
    pub formatted: String,
    /// USD valuation at the snapshot price; 0 when the price is unknown
    pub usd_value: f64,
}

/// Filter, order and value balances for display.
///
/// Drops unknown chains and non-positive amounts, sorts by chain priority
/// descending (stable, so equal priorities keep their input order) and
/// values each balance via `price_of`.
pub fn display_balances<F>(balances: &[WalletBalance], price_of: F) -> Vec<DisplayBalance>
where
    F: Fn(&str) -> Option<f64>,
{
    let mut kept: Vec<(Chain, &WalletBalance)> = balances
        .iter()
        .filter(|b| b.amount > 0.0)
        .filter_map(|b| Chain::from_str(&b.blockchain).map(|chain| (chain, b)))
        .collect();

    kept.sort_by_key(|(chain, _)| std::cmp::Reverse(chain.priority()));

    kept.into_iter()
        .map(|(chain, b)| DisplayBalance {
            chain,
            currency: b.currency.clone(),
            amount: b.amount,
            formatted: format!("{:.2}", b.amount),
            usd_value: price_of(&b.currency).unwrap_or(0.0) * b.amount,
        })
        .collect()
}
