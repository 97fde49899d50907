mod pair;
mod params;
mod quote;
mod tier;

pub use pair::TradingPair;
pub use params::{ParamsSnapshot, SpreadTable, SpreadUpdate, SpreadUpdated, TierSpreads};
pub use quote::{QuoteRequest, QuoteResult, INDICATIVE_NOTE};
pub use tier::ClientTier;
