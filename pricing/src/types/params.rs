use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};
use crate::types::{ClientTier, TradingPair};

/// Spread in basis points for each tier of a single pair.
pub type TierSpreads = BTreeMap<ClientTier, u32>;

/// Pair → tier → spread bps. Ordered so that the first tier of a pair is the
/// lowest label and serialized output is stable.
pub type SpreadTable = BTreeMap<TradingPair, TierSpreads>;

/// Point-in-time view of every pricing parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamsSnapshot {
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    pub spreads: SpreadTable,
}

impl ParamsSnapshot {
    /// Spread rows for `pair`.
    pub fn tiers(&self, pair: &str) -> Result<&TierSpreads> {
        self.spreads
            .get(pair)
            .ok_or_else(|| PricingError::PairNotFound(pair.to_string()))
    }

    /// Spread bps for a `(pair, tier)` cell. `tier` must already be normalized.
    pub fn spread_bps(&self, pair: &str, tier: &ClientTier) -> Result<u32> {
        self.tiers(pair)?
            .get(tier)
            .copied()
            .ok_or_else(|| PricingError::InvalidTier {
                pair: pair.to_string(),
                tier: tier.to_string(),
            })
    }

    /// Lowest tier configured for `pair`; used when a request omits its tier.
    pub fn default_tier(&self, pair: &str) -> Result<&ClientTier> {
        self.tiers(pair)?
            .keys()
            .next()
            .ok_or_else(|| PricingError::InvalidTier {
                pair: pair.to_string(),
                tier: String::new(),
            })
    }

    pub fn pairs(&self) -> impl Iterator<Item = &TradingPair> {
        self.spreads.keys()
    }
}

/// Body of `PUT /params`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadUpdate {
    pub pair: String,
    pub tier: String,
    /// Signed so that negative values reach validation instead of failing
    /// deserialization.
    pub new_spread_bps: i64,
}

/// Acknowledgement of an applied spread update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadUpdated {
    pub status: String,
    pub pair: TradingPair,
    pub tier: ClientTier,
    pub new_spread_bps: u32,
}

impl SpreadUpdated {
    pub fn new(pair: TradingPair, tier: ClientTier, new_spread_bps: u32) -> Self {
        Self {
            status: "updated".to_string(),
            pair,
            tier,
            new_spread_bps,
        }
    }
}
