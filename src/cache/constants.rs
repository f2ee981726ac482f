// ============================================================================
// Constant Cache
// Pi per precision configuration, log 2 at the highest precision seen
// ============================================================================

use crate::numeric::{PrecisionConfig, Real};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ConstantCache {
    pi: RwLock<HashMap<PrecisionConfig, Real>>,
    ln2: RwLock<Option<Real>>,
}

impl ConstantCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pi(&self, config: PrecisionConfig) -> Option<Real> {
        let hit = self.pi.read().get(&config).cloned();
        tracing::trace!(precision = config.precision(), hit = hit.is_some(), "pi lookup");
        hit
    }

    pub fn store_pi(&self, config: PrecisionConfig, value: Real) {
        self.pi.write().entry(config).or_insert(value);
    }

    /// Log 2 under `config`, if a value at least that precise is cached.
    pub fn ln2(&self, config: PrecisionConfig) -> Option<Real> {
        let guard = self.ln2.read();
        let hit = guard
            .as_ref()
            .filter(|cached| cached.precision() >= config.precision())
            .map(|cached| cached.copy_with(config));
        tracing::trace!(precision = config.precision(), hit = hit.is_some(), "ln2 lookup");
        hit
    }

    /// Keep `value` only if it is more precise than the cached one.
    pub fn store_ln2(&self, value: Real) {
        let mut slot = self.ln2.write();
        let better = slot
            .as_ref()
            .map_or(true, |cached| cached.precision() < value.precision());
        if better {
            *slot = Some(value);
        }
    }

    pub fn clear(&self) {
        self.pi.write().clear();
        *self.ln2.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(precision: u32) -> PrecisionConfig {
        PrecisionConfig::new(precision, true).unwrap()
    }

    #[test]
    fn test_pi_keyed_by_config() {
        let cache = ConstantCache::new();
        cache.store_pi(cfg(5), Real::new("3.1415", cfg(5)).unwrap());
        assert!(cache.pi(cfg(5)).is_some());
        assert!(cache.pi(cfg(6)).is_none());
        assert!(cache.pi(cfg(5).with_trim(false)).is_none());
    }

    #[test]
    fn test_ln2_served_at_lower_precision() {
        let cache = ConstantCache::new();
        cache.store_ln2(Real::new("0.69314718", cfg(8)).unwrap());
        let low = cache.ln2(cfg(4)).unwrap();
        assert_eq!(low, Real::new("0.6931", cfg(4)).unwrap());
        assert_eq!(low.precision(), 4);
        assert!(cache.ln2(cfg(9)).is_none());
    }

    #[test]
    fn test_ln2_keeps_most_precise() {
        let cache = ConstantCache::new();
        cache.store_ln2(Real::new("0.69314718", cfg(8)).unwrap());
        cache.store_ln2(Real::new("0.693", cfg(3)).unwrap());
        assert!(cache.ln2(cfg(8)).is_some());
        cache.clear();
        assert!(cache.ln2(cfg(1)).is_none());
    }
}
