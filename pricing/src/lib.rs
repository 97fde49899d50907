pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod store;
pub mod types;

// ---- Top-level re-exports for ergonomic usage ----

pub use auth::{ApiKey, API_KEY_HEADER};
pub use config::PricingConfig;
pub use engine::{compute_quote, compute_quote_at};
pub use error::{PricingError, Result};
pub use store::ParameterStore;

pub use types::{
    ClientTier, ParamsSnapshot, QuoteRequest, QuoteResult, SpreadTable, SpreadUpdate,
    SpreadUpdated, TierSpreads, TradingPair, INDICATIVE_NOTE,
};
