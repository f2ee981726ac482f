// ============================================================================
// Math Context
// Owns the caches and series limits shared by every transcendental function
// ============================================================================

use super::series::{is_negligible, threshold, SeriesGuard};
use crate::cache::{ConstantCache, MemoCache, MemoFunction};
use crate::interfaces::Number;
use crate::numeric::{NumericError, NumericResult, PrecisionConfig, Real};

/// Default cap on the number of terms any single series may take.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Default number of extra digits carried while a series runs.
pub const DEFAULT_GUARD_DIGITS: u32 = 10;

/// Entry point for transcendental functions.
///
/// Constants and memoized results live here rather than in process-wide
/// state; share one context across threads to share its caches.
#[derive(Debug)]
pub struct MathContext {
    /// Pi and log 2
    constants: ConstantCache,

    /// Results of the real-valued entry points, when enabled
    memo: Option<MemoCache>,

    /// Series iteration cap
    max_iterations: usize,

    /// Extra working digits
    guard_digits: u32,
}

impl MathContext {
    pub fn new() -> Self {
        Self {
            constants: ConstantCache::new(),
            memo: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            guard_digits: DEFAULT_GUARD_DIGITS,
        }
    }

    /// Enable memoization of exp, log, sqrt, sin, cos and arctan.
    pub fn with_memo(mut self) -> Self {
        self.memo = Some(MemoCache::new());
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn with_guard_digits(mut self, guard_digits: u32) -> Self {
        self.guard_digits = guard_digits;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn guard_digits(&self) -> u32 {
        self.guard_digits
    }

    pub fn memo(&self) -> Option<&MemoCache> {
        self.memo.as_ref()
    }

    /// Drop every cached constant and memoized result.
    pub fn clear_caches(&self) {
        self.constants.clear();
        if let Some(memo) = &self.memo {
            memo.clear();
        }
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    /// Working configuration for a series whose result is wanted at `config`.
    pub(crate) fn working(&self, config: PrecisionConfig) -> PrecisionConfig {
        config.widened(self.guard_digits).with_trim(true)
    }

    pub(crate) fn guard(&self, series: &'static str) -> SeriesGuard {
        SeriesGuard::new(series, self.max_iterations)
    }

    /// Run `compute` through the memo table when one is enabled.
    pub(crate) fn memo_real<F>(
        &self,
        function: MemoFunction,
        operand: &Real,
        compute: F,
    ) -> NumericResult<Real>
    where
        F: FnOnce() -> NumericResult<Real>,
    {
        let Some(memo) = &self.memo else {
            return compute();
        };
        let key = Number::Real(operand.clone());
        match memo.get_or_try_insert_with(function, &key, || compute().map(Number::Real))? {
            Number::Real(value) => Ok(value),
            Number::Complex(z) => Err(NumericError::domain(format!(
                "memoized {:?} of {} is not real: {}",
                function, operand, z
            ))),
        }
    }

    // ========================================================================
    // Constants
    // ========================================================================

    /// Pi under `config`, from the base-16 series
    /// `Σ 16^-k (4/(8k+1) - 2/(8k+4) - 1/(8k+5) - 1/(8k+6))`.
    ///
    /// # Errors
    /// Returns `NotConverged` if the iteration cap is reached.
    pub fn pi(&self, config: PrecisionConfig) -> NumericResult<Real> {
        if let Some(pi) = self.constants.pi(config) {
            return Ok(pi);
        }

        let work = self.working(config);
        let small = threshold(work);
        let sixteenth = Real::from_parts(625, 4, work);
        let int = |n: i64| Real::from_integer(n, work);

        let mut guard = self.guard("pi");
        let mut scale = Real::one(work);
        let mut sum = Real::zero(work);
        let mut k: i64 = 0;
        loop {
            let k8 = 8 * k;
            let inner = &(&(&int(4).checked_div(&int(k8 + 1))?
                - &int(2).checked_div(&int(k8 + 4))?)
                - &int(1).checked_div(&int(k8 + 5))?)
                - &int(1).checked_div(&int(k8 + 6))?;
            let term = &scale * &inner;
            sum += &term;
            if is_negligible(&term, &small) {
                break;
            }
            guard.tick()?;
            scale = &scale * &sixteenth;
            k += 1;
        }
        guard.converged();

        let pi = sum.copy_with(config);
        self.constants.store_pi(config, pi.clone());
        Ok(pi)
    }

    /// Log 2 under `config`; recomputed only when more precision is asked
    /// for than any earlier call.
    ///
    /// # Errors
    /// Returns `NotConverged` if the iteration cap is reached.
    pub fn ln2(&self, config: PrecisionConfig) -> NumericResult<Real> {
        if let Some(ln2) = self.constants.ln2(config) {
            return Ok(ln2);
        }
        let work = self.working(config);
        // log 2 = Σ (1/2)^k / k
        let half = Real::from_parts(5, 1, work);
        let ln2 = self.log_series(&half)?.copy_with(config);
        self.constants.store_ln2(ln2.clone());
        Ok(ln2)
    }
}

impl Default for MathContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(precision: u32) -> PrecisionConfig {
        PrecisionConfig::new(precision, true).unwrap()
    }

    #[test]
    fn test_pi_digits() {
        let ctx = MathContext::new();
        let pi = ctx.pi(cfg(30)).unwrap();
        assert_eq!(pi.to_string(), "3.14159265358979323846264338327");
    }

    #[test]
    fn test_pi_is_cached() {
        let ctx = MathContext::new();
        let first = ctx.pi(cfg(20)).unwrap();
        // A cap of one term would fail if the series ran again
        let ctx = ctx.with_max_iterations(1);
        assert_eq!(ctx.pi(cfg(20)).unwrap(), first);
        assert!(matches!(
            ctx.pi(cfg(21)),
            Err(NumericError::NotConverged { series: "pi", .. })
        ));
    }

    #[test]
    fn test_ln2_digits() {
        let ctx = MathContext::new();
        let ln2 = ctx.ln2(cfg(20)).unwrap();
        assert_eq!(ln2, Real::new("0.69314718055994530941", cfg(20)).unwrap());
        assert_eq!(ln2.to_string(), "6.9314718055994530941e-1");
    }

    #[test]
    fn test_ln2_reused_at_lower_precision() {
        let ctx = MathContext::new();
        ctx.ln2(cfg(40)).unwrap();
        let ctx = ctx.with_max_iterations(1);
        assert_eq!(ctx.ln2(cfg(10)).unwrap(), Real::new("0.6931471805", cfg(10)).unwrap());
        ctx.clear_caches();
        assert!(ctx.ln2(cfg(10)).is_err());
    }

    #[test]
    fn test_context_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MathContext>();
    }

    #[test]
    fn test_memo_rejects_complex_entry_for_real_function() {
        let ctx = MathContext::new().with_memo();
        let x = Real::new("0.5", cfg(20)).unwrap();
        let stored = crate::complex::Complex::new("1+2i", cfg(20)).unwrap();
        ctx.memo()
            .unwrap()
            .insert(MemoFunction::Exp, &Number::Real(x.clone()), Number::Complex(stored));
        assert!(matches!(ctx.exp(&x), Err(NumericError::Domain(_))));
    }
}
