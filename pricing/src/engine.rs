//! Indicative quote computation.
//!
//! Converts a market maker rate into client buy/sell prices:
//!
//! ```text
//! buy  = mm_rate * (1 + spread_bps / 10000 + tax_rate)
//! sell = mm_rate * (1 - spread_bps / 10000 - tax_rate)
//! ```
//!
//! Spread revenue and tax are always reported as if the client took the buy
//! side, since a request carries no direction.
//!
//! The formula runs in IEEE-754 doubles, evaluated left to right, and each
//! output is rounded half-to-even on the exact binary value of the double.
//! Published fixtures are keyed to that pipeline, so exact decimal arithmetic
//! would disagree on near-tie inputs (`2325 * 1.0046` is `2335.6949999...` as a
//! double and must round to `2335.69`).

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::error::{PricingError, Result};
use crate::types::{ClientTier, ParamsSnapshot, QuoteRequest, QuoteResult, INDICATIVE_NOTE};

/// Decimal places for quoted rates.
const RATE_DP: u32 = 2;
/// Decimal places for IDR amounts.
const IDR_DP: u32 = 0;

const BPS_PER_UNIT: f64 = 10_000.0;

/// Compute a quote stamped with the current server time.
pub fn compute_quote(request: &QuoteRequest, params: &ParamsSnapshot) -> Result<QuoteResult> {
    compute_quote_at(request, params, Utc::now())
}

/// Compute a quote with an explicit timestamp.
///
/// Validation order: pair, then tier, then rate/volume. The first failing
/// check is reported.
pub fn compute_quote_at(
    request: &QuoteRequest,
    params: &ParamsSnapshot,
    now: DateTime<Utc>,
) -> Result<QuoteResult> {
    let (pair, tiers) = params
        .spreads
        .get_key_value(request.pair.as_str())
        .ok_or_else(|| PricingError::PairNotFound(request.pair.clone()))?;

    let tier = match request.client_tier.as_deref() {
        Some(label) => ClientTier::new(label),
        None => params.default_tier(pair.as_str())?.clone(),
    };
    let spread_bps = *tiers.get(&tier).ok_or_else(|| PricingError::InvalidTier {
        pair: pair.to_string(),
        tier: tier.to_string(),
    })?;

    let mm_rate = positive("mm_rate", request.mm_rate)?;
    let volume = positive("volume", request.volume)?;

    let spread_rate = f64::from(spread_bps) / BPS_PER_UNIT;
    let tax_rate = decimal_to_f64(params.tax_rate);

    let buy_quote = mm_rate * (1.0 + spread_rate + tax_rate);
    let sell_quote = mm_rate * (1.0 - spread_rate - tax_rate);

    let idr_total_buy = volume * buy_quote;
    let idr_total_sell = volume * sell_quote;

    let gross_spread_idr = volume * mm_rate * spread_rate;
    let tax_idr = idr_total_buy * tax_rate;
    let net_pnl_idr = gross_spread_idr - tax_idr;

    if !idr_total_buy.is_finite() || !net_pnl_idr.is_finite() {
        return Err(PricingError::InvalidInput(format!(
            "quote amounts are not finite for mm_rate={mm_rate} volume={volume}"
        )));
    }

    Ok(QuoteResult {
        pair: pair.clone(),
        mm_rate,
        volume,
        client_tier: tier,
        spread_bps,
        tax_rate: params.tax_rate,
        buy_quote: round_half_even(buy_quote, RATE_DP),
        sell_quote: round_half_even(sell_quote, RATE_DP),
        idr_total_buy: round_half_even(idr_total_buy, IDR_DP),
        idr_total_sell: round_half_even(idr_total_sell, IDR_DP),
        gross_spread_idr: round_half_even(gross_spread_idr, IDR_DP),
        tax_idr: round_half_even(tax_idr, IDR_DP),
        net_pnl_idr: round_half_even(net_pnl_idr, IDR_DP),
        timestamp: now,
        note: INDICATIVE_NOTE.to_string(),
    })
}

/// Reject zero, negative and non-finite inputs.
fn positive(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PricingError::InvalidInput(format!(
            "{field} must be a positive number, got {value}"
        )))
    }
}

/// Round `value` to `dp` places, half to even, judged on the exact binary
/// value of the double. The result is the double nearest the rounded decimal.
///
/// Doubles too large for `Decimal` are already integers and pass through.
fn round_half_even(value: f64, dp: u32) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(exact) => decimal_to_f64(
            exact.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven),
        ),
        None => value,
    }
}

/// Nearest double to a decimal value.
fn decimal_to_f64(value: Decimal) -> f64 {
    value
        .to_string()
        .parse()
        .unwrap_or_else(|_| value.as_f64())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::config::PricingConfig;

    fn params() -> ParamsSnapshot {
        PricingConfig::default().into()
    }

    #[test]
    fn test_round_half_even_on_binary_value() {
        // Exactly representable ties go to even.
        assert_eq!(round_half_even(0.125, 2), 0.12);
        assert_eq!(round_half_even(0.375, 2), 0.38);
        assert_eq!(round_half_even(2.5, 0), 2.0);
        assert_eq!(round_half_even(3.5, 0), 4.0);
        // 2.675 is stored as 2.67499999...
        assert_eq!(round_half_even(2.675, 2), 2.67);
        assert_eq!(round_half_even(-9599.448, 0), -9599.0);
    }

    #[test]
    fn test_round_passes_through_huge_values() {
        assert_eq!(round_half_even(1.0036e40, 0), 1.0036e40);
        assert_eq!(round_half_even(-2.5e35, 2), -2.5e35);
    }

    #[test]
    fn test_decimal_to_f64_is_nearest() {
        assert_eq!(decimal_to_f64(dec!(0.0021)), 0.0021);
        assert_eq!(decimal_to_f64(dec!(15856.88)), 15856.88);
    }

    #[test]
    fn test_positive_rejects_non_positive() {
        assert!(positive("mm_rate", 0.0).is_err());
        assert!(positive("mm_rate", -1.0).is_err());
        assert!(positive("mm_rate", f64::NAN).is_err());
        assert!(positive("mm_rate", f64::INFINITY).is_err());
        assert_eq!(positive("volume", 0.5).unwrap(), 0.5);
        assert_eq!(positive("volume", 1e300).unwrap(), 1e300);
    }

    #[test]
    fn test_default_tier_is_lowest() {
        let q = compute_quote(&QuoteRequest::new("BTC/IDR", 650_000_000.0, 0.1), &params()).unwrap();
        assert_eq!(q.client_tier.as_str(), "A");
        assert_eq!(q.spread_bps, 55);
    }

    #[test]
    fn test_tier_is_case_insensitive() {
        let req = QuoteRequest::new("USDT/IDR", 15800.0, 10.0).with_tier("c");
        let q = compute_quote(&req, &params()).unwrap();
        assert_eq!(q.client_tier.as_str(), "C");
        assert_eq!(q.spread_bps, 25);
    }

    #[test]
    fn test_pair_checked_before_inputs() {
        let req = QuoteRequest::new("DOGE/IDR", -1.0, 0.0).with_tier("Z");
        assert!(matches!(
            compute_quote(&req, &params()),
            Err(PricingError::PairNotFound(_))
        ));
    }

    #[test]
    fn test_tier_checked_before_inputs() {
        let req = QuoteRequest::new("USDT/IDR", -1.0, 0.0).with_tier("Z");
        assert!(matches!(
            compute_quote(&req, &params()),
            Err(PricingError::InvalidTier { .. })
        ));
    }

    #[test]
    fn test_large_inputs_are_quoted() {
        let req = QuoteRequest::new("USDT/IDR", 1e20, 1e20);
        let q = compute_quote(&req, &params()).unwrap();
        assert_eq!(q.buy_quote, 1.0036e20);
        assert_eq!(q.idr_total_buy, 1.0036e40);
        assert_eq!(q.gross_spread_idr, 1.5e37);

        let req = QuoteRequest::new("BTC/IDR", 1e30, 2.0);
        assert!(compute_quote(&req, &params()).is_ok());
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        let req = QuoteRequest::new("USDT/IDR", 1e200, 1e200);
        assert!(matches!(
            compute_quote(&req, &params()),
            Err(PricingError::InvalidInput(_))
        ));
    }
}
