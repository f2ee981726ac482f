// ============================================================================
// Series Kernel
// Shared pieces of every convergent series: factorials, threshold, cap
// ============================================================================

use crate::complex::Complex;
use crate::numeric::{NumericError, NumericResult, PrecisionConfig, Real};
use num_bigint::BigInt;
use num_traits::One;
use std::cmp::Ordering;

/// Extra decimal places the convergence threshold reaches past the precision.
pub const OVERSHOOT: u32 = 1;

/// Factorial generator: 0!, 1!, 2!, 3!, ...
#[derive(Debug, Clone)]
pub struct Factorials {
    index: u64,
    value: BigInt,
}

impl Factorials {
    pub fn new() -> Self {
        Self {
            index: 0,
            value: BigInt::one(),
        }
    }
}

impl Default for Factorials {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Factorials {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        let current = self.value.clone();
        self.index += 1;
        self.value *= self.index;
        Some(current)
    }
}

/// `10^-(precision + OVERSHOOT)`: terms below this end a series.
pub fn threshold(config: PrecisionConfig) -> Real {
    let places = i64::from(config.precision()) + i64::from(OVERSHOOT);
    Real::from_parts(1, places, config)
}

/// `|term| < small`
#[inline]
pub fn is_negligible(term: &Real, small: &Real) -> bool {
    term.scaled().abs().cmp_value(small.scaled()) == Ordering::Less
}

/// Both components of a complex term are below the threshold.
#[inline]
pub fn is_negligible_complex(term: &Complex, small: &Real) -> bool {
    is_negligible(term.re(), small) && is_negligible(term.im(), small)
}

/// Iteration counter that turns a runaway series into an error.
#[derive(Debug)]
pub struct SeriesGuard {
    series: &'static str,
    max_iterations: usize,
    iterations: usize,
}

impl SeriesGuard {
    pub fn new(series: &'static str, max_iterations: usize) -> Self {
        Self {
            series,
            max_iterations,
            iterations: 0,
        }
    }

    /// Count one more term.
    ///
    /// # Errors
    /// Returns `NotConverged` once the cap is exceeded.
    pub fn tick(&mut self) -> NumericResult<()> {
        self.iterations += 1;
        if self.iterations >= self.max_iterations {
            tracing::debug!(
                series = self.series,
                iterations = self.iterations,
                "series hit iteration cap"
            );
            return Err(NumericError::NotConverged {
                series: self.series,
                iterations: self.iterations,
            });
        }
        Ok(())
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn converged(&self) {
        tracing::debug!(
            series = self.series,
            iterations = self.iterations,
            "series converged"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorials() {
        let first: Vec<BigInt> = Factorials::new().take(6).collect();
        let expected: Vec<BigInt> = [1, 1, 2, 6, 24, 120].iter().map(|&n| BigInt::from(n)).collect();
        assert_eq!(first, expected);
    }

    #[test]
    fn test_factorials_filtered_by_parity() {
        let odd: Vec<BigInt> = Factorials::new()
            .enumerate()
            .filter(|(i, _)| i % 2 == 1)
            .map(|(_, f)| f)
            .take(3)
            .collect();
        assert_eq!(odd, vec![BigInt::from(1), BigInt::from(6), BigInt::from(120)]);
    }

    #[test]
    fn test_threshold() {
        let cfg = PrecisionConfig::new(5, true).unwrap();
        let small = threshold(cfg);
        assert_eq!(small, Real::new("0.000001", cfg).unwrap());
        assert!(is_negligible(&Real::new("-0.0000009", cfg).unwrap(), &small));
        assert!(!is_negligible(&Real::new("0.000001", cfg).unwrap(), &small));
    }

    #[test]
    fn test_guard_caps_iterations() {
        let mut guard = SeriesGuard::new("test", 3);
        assert!(guard.tick().is_ok());
        assert!(guard.tick().is_ok());
        assert_eq!(
            guard.tick(),
            Err(NumericError::NotConverged {
                series: "test",
                iterations: 3
            })
        );
    }
}
