//! Swap history
//!
//! In-memory record of executed swaps, newest first. Nothing is persisted;
//! the store lives for the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::types::ConversionQuote;

/// Settlement state of a recorded swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapStatus {
    Completed,
    Pending,
    Failed,
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapStatus::Completed => write!(f, "COMPLETED"),
            SwapStatus::Pending => write!(f, "PENDING"),
            SwapStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// One executed swap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRecord {
    /// Unique record ID
    pub id: String,
    /// Source currency symbol
    pub from_currency: String,
    /// Destination currency symbol
    pub to_currency: String,
    /// Amount sent, in source units
    pub from_amount: f64,
    /// Amount received, in destination units
    pub to_amount: f64,
    /// Exchange rate applied
    pub rate: f64,
    /// Commission charged in USD
    pub commission: f64,
    /// When the swap was recorded
    pub timestamp: DateTime<Utc>,
    /// Settlement state
    pub status: SwapStatus,
}

/// Newest-first store of swap records.
#[derive(Debug, Default)]
pub struct SwapHistory {
    records: Vec<SwapRecord>,
}

impl SwapHistory {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a swap from its quote. Assigns the ID and timestamp.
    pub fn record(
        &mut self,
        from: &str,
        to: &str,
        quote: &ConversionQuote,
        status: SwapStatus,
    ) -> SwapRecord {
        let record = SwapRecord {
            id: Uuid::new_v4().to_string(),
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            from_amount: quote.source_amount,
            to_amount: quote.dest_amount,
            rate: quote.rate,
            commission: quote.commission,
            timestamp: Utc::now(),
            status,
        };
        // Newest first
        self.records.insert(0, record.clone());
        record
    }

    /// All records, newest first.
    pub fn all(&self) -> &[SwapRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&SwapRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records where `symbol` appears on either side of the swap.
    pub fn for_currency(&self, symbol: &str) -> Vec<SwapRecord> {
        self.records
            .iter()
            .filter(|r| r.from_currency == symbol || r.to_currency == symbol)
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(amount: f64, rate: f64) -> ConversionQuote {
        ConversionQuote {
            source_amount: amount,
            dest_amount: amount * rate,
            rate,
            commission: 2.48,
            total_expected: 0.0,
            minimum_received: 0.0,
        }
    }

    #[test]
    fn test_records_are_newest_first() {
        let mut history = SwapHistory::new();
        history.record("BTC", "ETH", &quote(1.0, 11.0), SwapStatus::Completed);
        history.record("ETH", "USDC", &quote(5.0, 10.0), SwapStatus::Pending);

        assert_eq!(history.len(), 2);
        assert_eq!(history.all()[0].from_currency, "ETH");
        assert_eq!(history.all()[1].from_currency, "BTC");
    }

    #[test]
    fn test_get_by_id() {
        let mut history = SwapHistory::new();
        let record = history.record("BTC", "ETH", &quote(1.0, 11.0), SwapStatus::Completed);

        let found = history.get(&record.id).unwrap();
        assert_eq!(found.to_amount, 11.0);
        assert!(history.get("missing").is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut history = SwapHistory::new();
        let a = history.record("BTC", "ETH", &quote(1.0, 11.0), SwapStatus::Completed);
        let b = history.record("BTC", "ETH", &quote(1.0, 11.0), SwapStatus::Completed);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_for_currency_matches_either_side() {
        let mut history = SwapHistory::new();
        history.record("BTC", "ETH", &quote(1.0, 11.0), SwapStatus::Completed);
        history.record("ETH", "USDC", &quote(5.0, 10.0), SwapStatus::Completed);
        history.record("USDC", "ATOM", &quote(100.0, 0.1), SwapStatus::Failed);

        assert_eq!(history.for_currency("ETH").len(), 2);
        assert_eq!(history.for_currency("ATOM").len(), 1);
        assert!(history.for_currency("DOGE").is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history = SwapHistory::new();
        history.record("BTC", "ETH", &quote(1.0, 11.0), SwapStatus::Completed);
        history.clear();
        assert!(history.is_empty());
    }
}
