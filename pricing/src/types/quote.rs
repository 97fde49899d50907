use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ClientTier, TradingPair};

/// Advisory attached to every quote.
pub const INDICATIVE_NOTE: &str = "Indicative only. Confirm before quoting client.";

/// Body of `POST /quote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub pair: String,
    /// Market maker base rate in IDR per unit of the base asset.
    pub mm_rate: f64,
    /// Traded volume in units of the base asset.
    pub volume: f64,
    /// Defaults to the pair's lowest tier when omitted.
    #[serde(default)]
    pub client_tier: Option<String>,
}

impl QuoteRequest {
    pub fn new(pair: &str, mm_rate: f64, volume: f64) -> Self {
        Self {
            pair: pair.to_string(),
            mm_rate,
            volume,
            client_tier: None,
        }
    }

    pub fn with_tier(mut self, tier: &str) -> Self {
        self.client_tier = Some(tier.to_string());
        self
    }
}

/// Client-facing indicative quote.
///
/// Quoted rates are rounded to 2 dp and IDR amounts to whole units. Amounts
/// are doubles, the nearest ones to the rounded decimal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub pair: TradingPair,
    pub mm_rate: f64,
    pub volume: f64,
    pub client_tier: ClientTier,
    pub spread_bps: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    pub buy_quote: f64,
    pub sell_quote: f64,
    pub idr_total_buy: f64,
    pub idr_total_sell: f64,
    pub gross_spread_idr: f64,
    pub tax_idr: f64,
    pub net_pnl_idr: f64,
    pub timestamp: DateTime<Utc>,
    pub note: String,
}
