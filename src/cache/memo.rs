// ============================================================================
// Memoization Cache
// Results of pure functions keyed by operand text and precision
// ============================================================================

use crate::interfaces::Number;
use crate::numeric::{format_scaled, NumericResult, PrecisionConfig};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Functions whose results can be memoized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoFunction {
    Exp,
    Log,
    Sqrt,
    Sin,
    Cos,
    Arctan,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MemoKey {
    function: MemoFunction,
    operand: String,
    config: PrecisionConfig,
}

impl MemoKey {
    fn new(function: MemoFunction, operand: &Number) -> Self {
        let config = operand.config();
        // Display overrides are presentation only and stay out of the key
        let operand = match operand {
            Number::Real(r) => format_scaled(r.scaled()),
            Number::Complex(z) => format!(
                "{}|{}",
                format_scaled(z.re().scaled()),
                format_scaled(z.im().scaled())
            ),
        };
        Self {
            function,
            operand,
            config,
        }
    }
}

/// Unbounded memo table. Entries never change once written; there is no
/// eviction, only [`MemoCache::clear`].
#[derive(Debug, Default)]
pub struct MemoCache {
    entries: RwLock<HashMap<MemoKey, Number>>,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, function: MemoFunction, operand: &Number) -> Option<Number> {
        let key = MemoKey::new(function, operand);
        let hit = self.entries.read().get(&key).cloned();
        tracing::trace!(?function, operand = %key.operand, hit = hit.is_some(), "memo lookup");
        hit
    }

    pub fn insert(&self, function: MemoFunction, operand: &Number, value: Number) {
        let key = MemoKey::new(function, operand);
        self.entries.write().entry(key).or_insert(value);
    }

    /// Return the cached value or compute and store it.
    ///
    /// Concurrent callers may compute the same entry twice; the first
    /// stored value wins.
    pub fn get_or_try_insert_with<F>(
        &self,
        function: MemoFunction,
        operand: &Number,
        compute: F,
    ) -> NumericResult<Number>
    where
        F: FnOnce() -> NumericResult<Number>,
    {
        if let Some(hit) = self.get(function, operand) {
            return Ok(hit);
        }
        let value = compute()?;
        self.insert(function, operand, value.clone());
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
