//! Swap quote evaluator
//!
//! Turns a source amount into destination proceeds, applying a flat
//! USD-denominated commission and a slippage margin to report the
//! guaranteed minimum received. Pure request/response over the current
//! price snapshot; no state.

use serde::Deserialize;

use crate::types::{ConversionQuote, Currency};

/// Fee parameters applied to every conversion.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SwapFees {
    /// Flat fee per conversion, in USD
    pub commission_usd: f64,
    /// Tolerance subtracted from expected proceeds (0.01 = 1%)
    pub slippage_fraction: f64,
}

impl Default for SwapFees {
    fn default() -> Self {
        Self {
            commission_usd: 2.48,
            slippage_fraction: 0.01,
        }
    }
}

/// Evaluate a conversion of `source_amount` units of `from` at `rate`.
///
/// The commission is subtracted from the USD value of the amount sent,
/// not from the destination units. A zero, negative or non-finite amount
/// yields an empty quote rather than an error; the caller decides whether
/// such a quote is submittable.
pub fn quote_conversion(
    from: &Currency,
    rate: f64,
    source_amount: f64,
    fees: &SwapFees,
) -> ConversionQuote {
    if !source_amount.is_finite() || source_amount <= 0.0 {
        return ConversionQuote::empty(rate, fees.commission_usd);
    }

    let dest_amount = source_amount * rate;
    let total_expected = source_amount * from.price - fees.commission_usd;
    let minimum_received = total_expected * (1.0 - fees.slippage_fraction);

    ConversionQuote {
        source_amount,
        dest_amount,
        rate,
        commission: fees.commission_usd,
        total_expected,
        minimum_received,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn btc() -> Currency {
        Currency {
            symbol: "BTC".to_string(),
            price: 110.0,
            last_updated: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }

    #[test]
    fn test_quote_worked_example() {
        // 2 BTC -> ETH at rate 11 with a $2.48 commission and 1% slippage
        let fees = SwapFees {
            commission_usd: 2.48,
            slippage_fraction: 0.01,
        };
        let quote = quote_conversion(&btc(), 11.0, 2.0, &fees);

        assert_eq!(quote.dest_amount, 22.0);
        assert!((quote.total_expected - 217.52).abs() < 1e-9);
        assert!((quote.minimum_received - 215.3448).abs() < 1e-9);
        assert_eq!(quote.commission, 2.48);
        assert_eq!(quote.rate, 11.0);
    }

    #[test]
    fn test_zero_amount_yields_empty_quote() {
        let quote = quote_conversion(&btc(), 11.0, 0.0, &SwapFees::default());

        assert_eq!(quote.source_amount, 0.0);
        assert_eq!(quote.dest_amount, 0.0);
        assert_eq!(quote.total_expected, 0.0);
        assert_eq!(quote.minimum_received, 0.0);
        assert_eq!(quote.rate, 11.0);
    }

    #[test]
    fn test_negative_and_nan_amounts_yield_empty_quote() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let quote = quote_conversion(&btc(), 11.0, bad, &SwapFees::default());
            assert_eq!(quote.dest_amount, 0.0, "amount {} should quote empty", bad);
        }
    }

    #[test]
    fn test_commission_applies_to_usd_value_not_dest_units() {
        let fees = SwapFees {
            commission_usd: 10.0,
            slippage_fraction: 0.0,
        };
        let quote = quote_conversion(&btc(), 11.0, 1.0, &fees);

        // Destination units are untouched by the commission
        assert_eq!(quote.dest_amount, 11.0);
        // USD proceeds carry the fee
        assert_eq!(quote.total_expected, 100.0);
        assert_eq!(quote.minimum_received, 100.0);
    }

    #[test]
    fn test_commission_can_exceed_small_amounts() {
        // A tiny swap can net out negative; the quote reports it as-is
        let quote = quote_conversion(&btc(), 11.0, 0.01, &SwapFees::default());
        assert!(quote.total_expected < 0.0);
        assert!(quote.minimum_received < 0.0);
    }

    #[test]
    fn test_slippage_scales_minimum_received() {
        let fees = SwapFees {
            commission_usd: 0.0,
            slippage_fraction: 0.05,
        };
        let quote = quote_conversion(&btc(), 11.0, 1.0, &fees);
        assert!((quote.minimum_received - 110.0 * 0.95).abs() < 1e-9);
    }
}
