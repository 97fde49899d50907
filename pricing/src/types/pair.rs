use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// A `BASE/QUOTE` trading pair identifier, e.g. `USDT/IDR`.
///
/// Lookups against the spread table are exact; no case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TradingPair(String);

impl TradingPair {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base asset leg (`USDT` in `USDT/IDR`).
    pub fn base(&self) -> &str {
        self.0.split_once('/').map(|(b, _)| b).unwrap_or(&self.0)
    }

    /// Quote asset leg (`IDR` in `USDT/IDR`).
    pub fn quote(&self) -> &str {
        self.0.split_once('/').map(|(_, q)| q).unwrap_or("")
    }
}

impl FromStr for TradingPair {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('/') {
            Some((base, quote))
                if !base.is_empty() && !quote.is_empty() && !quote.contains('/') =>
            {
                Ok(Self(s.to_string()))
            }
            _ => Err(PricingError::Config(format!(
                "trading pair must look like BASE/QUOTE, got {s:?}"
            ))),
        }
    }
}

impl TryFrom<String> for TradingPair {
    type Error = PricingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TradingPair> for String {
    fn from(p: TradingPair) -> Self {
        p.0
    }
}

impl Borrow<str> for TradingPair {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
