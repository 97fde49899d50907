//! Shared, runtime-mutable pricing parameters.
//!
//! Readers take a cheap `Arc` clone of the current snapshot under a shared
//! lock and never block each other. The single writer validates the update
//! against the current snapshot, then swaps in a copy with one cell replaced.
//! A snapshot handed out earlier is never mutated.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::config::PricingConfig;
use crate::error::{PricingError, Result};
use crate::types::{ClientTier, ParamsSnapshot, SpreadUpdate, SpreadUpdated};

/// Process-wide tax rate and spread table.
#[derive(Debug)]
pub struct ParameterStore {
    current: RwLock<Arc<ParamsSnapshot>>,
}

impl ParameterStore {
    pub fn new(config: PricingConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config.into())),
        }
    }

    /// Consistent point-in-time view of every parameter.
    pub fn snapshot(&self) -> Arc<ParamsSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Current spread for a single `(pair, tier)` cell.
    pub fn spread_bps(&self, pair: &str, tier: &str) -> Result<u32> {
        self.current.read().spread_bps(pair, &ClientTier::new(tier))
    }

    /// Replace one `(pair, tier)` spread cell.
    ///
    /// # Errors
    ///
    /// * `PairNotFound` if `pair` is not configured.
    /// * `InvalidTier` if `tier` is not configured for `pair`.
    /// * `InvalidValue` if `new_bps` is negative or too large.
    ///
    /// On error the store is left untouched.
    pub fn update_spread(&self, pair: &str, tier: &str, new_bps: i64) -> Result<SpreadUpdated> {
        let tier = ClientTier::new(tier);

        let mut guard = self.current.write();

        let (pair_key, _) = guard
            .spreads
            .get_key_value(pair)
            .ok_or_else(|| PricingError::PairNotFound(pair.to_string()))?;
        let pair_key = pair_key.clone();
        guard.spread_bps(pair, &tier)?;

        let new_bps = u32::try_from(new_bps).map_err(|_| {
            PricingError::InvalidValue(format!(
                "new_spread_bps must be a non-negative integer, got {new_bps}"
            ))
        })?;

        let next = Arc::make_mut(&mut *guard);
        if let Some(cell) = next
            .spreads
            .get_mut(pair)
            .and_then(|tiers| tiers.get_mut(&tier))
        {
            *cell = new_bps;
        }
        drop(guard);

        info!(pair = %pair_key, tier = %tier, new_spread_bps = new_bps, "spread updated");
        Ok(SpreadUpdated::new(pair_key, tier, new_bps))
    }

    /// Apply a decoded `PUT /params` body.
    pub fn apply(&self, update: &SpreadUpdate) -> Result<SpreadUpdated> {
        self.update_spread(&update.pair, &update.tier, update.new_spread_bps)
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_replaces_cell() {
        let store = ParameterStore::default();
        let ack = store.update_spread("USDT/IDR", "B", 33).unwrap();
        assert_eq!(ack.status, "updated");
        assert_eq!(ack.new_spread_bps, 33);
        assert_eq!(store.spread_bps("USDT/IDR", "B").unwrap(), 33);
    }

    #[test]
    fn test_update_normalizes_tier() {
        let store = ParameterStore::default();
        let ack = store.update_spread("USDC/IDR", "c", 40).unwrap();
        assert_eq!(ack.tier.as_str(), "C");
        assert_eq!(store.spread_bps("USDC/IDR", "C").unwrap(), 40);
    }

    #[test]
    fn test_earlier_snapshot_is_not_mutated() {
        let store = ParameterStore::default();
        let before = store.snapshot();
        store.update_spread("BTC/IDR", "A", 1).unwrap();
        assert_eq!(before.spread_bps("BTC/IDR", &ClientTier::new("A")).unwrap(), 55);
        assert_eq!(store.spread_bps("BTC/IDR", "A").unwrap(), 1);
    }

    #[test]
    fn test_errors_leave_store_untouched() {
        let store = ParameterStore::default();
        let before = store.snapshot();

        assert!(matches!(
            store.update_spread("ETH/IDR", "A", 10),
            Err(PricingError::PairNotFound(_))
        ));
        assert!(matches!(
            store.update_spread("BTC/IDR", "Z", 10),
            Err(PricingError::InvalidTier { .. })
        ));
        assert!(matches!(
            store.update_spread("BTC/IDR", "A", -5),
            Err(PricingError::InvalidValue(_))
        ));
        assert!(matches!(
            store.update_spread("BTC/IDR", "A", i64::from(u32::MAX) + 1),
            Err(PricingError::InvalidValue(_))
        ));

        assert_eq!(*store.snapshot(), *before);
        assert!(Arc::ptr_eq(&store.snapshot(), &before));
    }

    #[test]
    fn test_zero_is_a_valid_spread() {
        let store = ParameterStore::default();
        store.update_spread("PAXG/IDR", "A", 0).unwrap();
        assert_eq!(store.spread_bps("PAXG/IDR", "A").unwrap(), 0);
    }
}
