//! Static pricing configuration loaded at process start.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PricingError, Result};
use crate::types::{ClientTier, ParamsSnapshot, SpreadTable, TierSpreads, TradingPair};

/// Every pair is quoted in IDR.
pub const QUOTE_CURRENCY: &str = "IDR";

/// Initial tax rate and spread table.
///
/// The JSON file format is the same shape `GET /params` returns:
///
/// ```json
/// { "tax_rate": 0.0021, "spreads": { "USDT/IDR": { "A": 15, "B": 20 } } }
/// ```
///
/// Use [`Default::default()`] for the built-in IDR table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Tax applied to client-facing notional, as a fraction (0.0021 = 0.21%).
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    /// Spread bps per pair and client tier. Labels that collide once
    /// normalized (`"a"` and `"A"`) are rejected.
    #[serde(deserialize_with = "deserialize_spreads")]
    pub spreads: SpreadTable,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let rows: [(&str, [u32; 3]); 4] = [
            ("USDT/IDR", [15, 20, 25]),
            ("USDC/IDR", [18, 22, 27]),
            ("BTC/IDR", [55, 75, 100]),
            ("PAXG/IDR", [70, 95, 130]),
        ];

        let spreads = rows
            .iter()
            .filter_map(|(pair, bps)| {
                let pair = pair.parse::<TradingPair>().ok()?;
                let tiers = ["A", "B", "C"]
                    .iter()
                    .zip(bps)
                    .map(|(tier, bps)| (ClientTier::new(tier), *bps))
                    .collect::<BTreeMap<_, _>>();
                Some((pair, tiers))
            })
            .collect();

        Self {
            tax_rate: dec!(0.0021),
            spreads,
        }
    }
}

impl PricingConfig {
    /// Read and validate a JSON parameters file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise fall back to the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_json_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Check the invariants the quote engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.tax_rate < Decimal::ZERO || self.tax_rate >= Decimal::ONE {
            return Err(PricingError::Config(format!(
                "tax_rate must be in [0, 1), got {}",
                self.tax_rate
            )));
        }
        if self.spreads.is_empty() {
            return Err(PricingError::Config("spread table is empty".to_string()));
        }
        for (pair, tiers) in &self.spreads {
            if pair.quote() != QUOTE_CURRENCY {
                return Err(PricingError::Config(format!(
                    "pair {pair} must be quoted in {QUOTE_CURRENCY}"
                )));
            }
            if pair.base() == pair.quote() {
                return Err(PricingError::Config(format!(
                    "pair {pair} has the same base and quote asset"
                )));
            }
            if tiers.is_empty() {
                return Err(PricingError::Config(format!("pair {pair} has no tiers")));
            }
            if tiers.keys().any(ClientTier::is_empty) {
                return Err(PricingError::Config(format!(
                    "pair {pair} has an empty tier label"
                )));
            }
        }
        Ok(())
    }
}

/// Build the spread table from raw labels, refusing pairs or tiers that
/// normalize to a key already seen.
fn deserialize_spreads<'de, D>(deserializer: D) -> std::result::Result<SpreadTable, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, BTreeMap<String, u32>>::deserialize(deserializer)?;

    let mut table = SpreadTable::new();
    for (pair_label, raw_tiers) in raw {
        let pair = pair_label.parse::<TradingPair>().map_err(D::Error::custom)?;

        let mut tiers = TierSpreads::new();
        for (label, bps) in raw_tiers {
            let tier = ClientTier::new(&label);
            if tiers.insert(tier.clone(), bps).is_some() {
                return Err(D::Error::custom(format!(
                    "pair {pair} lists tier {tier} more than once"
                )));
            }
        }

        if table.insert(pair.clone(), tiers).is_some() {
            return Err(D::Error::custom(format!("pair {pair} is listed more than once")));
        }
    }
    Ok(table)
}

impl From<PricingConfig> for ParamsSnapshot {
    fn from(config: PricingConfig) -> Self {
        Self {
            tax_rate: config.tax_rate,
            spreads: config.spreads,
        }
    }
}
