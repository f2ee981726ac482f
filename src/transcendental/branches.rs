// ============================================================================
// Branch Handles
// Every value of the multi-valued log and root, indexed by an integer k
// ============================================================================

use super::context::MathContext;
use super::functions::{branch_index, scale_down, widen};
use crate::complex::Complex;
use crate::interfaces::Number;
use crate::numeric::{NumericError, NumericResult, PrecisionConfig, Real};

/// All values of `log x`: `principal + i·2πk`.
#[derive(Debug, Clone)]
pub struct LogBranches {
    principal: Complex,
    two_pi: Real,
}

impl LogBranches {
    pub fn principal(&self) -> &Complex {
        &self.principal
    }

    pub fn branch(&self, k: i64) -> Complex {
        let shift = &self.two_pi * k;
        Complex::from_reals(self.principal.re().clone(), self.principal.im() + &shift)
    }

    /// # Errors
    /// Returns `InvalidExponent` if `k` is not an integer.
    pub fn branch_at(&self, k: &Real) -> NumericResult<Complex> {
        Ok(self.branch(branch_index(k)?))
    }
}

/// All `n`th roots of `x`: `exp((log x + i·2πk) / n)`.
///
/// Branches repeat with period `n` in `k`.
#[derive(Debug, Clone)]
pub struct RootBranches<'a> {
    ctx: &'a MathContext,
    /// Held at working precision
    log: LogBranches,
    config: PrecisionConfig,
    degree: u32,
    /// `Some` only for a zero radicand, whose only root is zero
    zero: Option<Complex>,
}

impl RootBranches<'_> {
    pub fn branch_count(&self) -> u32 {
        self.degree
    }

    /// # Errors
    /// Returns `NotConverged` if the exponential series hits the cap.
    pub fn branch(&self, k: i64) -> NumericResult<Complex> {
        if let Some(zero) = &self.zero {
            return Ok(zero.clone());
        }
        let log = self.log.branch(k);
        let degree = Real::from_integer(self.degree, log.config());
        let scaled = scale_down(&log, &degree)?;
        Ok(self.ctx.exp_complex(&scaled)?.copy_with(self.config))
    }

    /// # Errors
    /// Returns `InvalidExponent` if `k` is not an integer.
    pub fn branch_at(&self, k: &Real) -> NumericResult<Complex> {
        self.branch(branch_index(k)?)
    }

    /// The `n` distinct roots, `k = 0 .. n`.
    pub fn all(&self) -> NumericResult<Vec<Complex>> {
        (0..i64::from(self.degree)).map(|k| self.branch(k)).collect()
    }
}

impl MathContext {
    /// Handle over every branch of `log x`.
    ///
    /// # Errors
    /// Returns `Domain` for zero.
    pub fn log_branches(&self, x: &Number) -> NumericResult<LogBranches> {
        let principal = self.log(x)?.into_complex();
        let config = principal.config();
        let two_pi = &self.pi(config)? * 2;
        Ok(LogBranches { principal, two_pi })
    }

    /// Handle over every `n`th root of `x`.
    ///
    /// # Errors
    /// Returns `Domain` when `n` is zero.
    pub fn root_branches(&self, x: &Number, n: u32) -> NumericResult<RootBranches<'_>> {
        if n == 0 {
            return Err(NumericError::domain("zeroth root is undefined"));
        }
        let config = x.config();
        if x.is_zero() {
            return Ok(RootBranches {
                ctx: self,
                log: LogBranches {
                    principal: Complex::zero(config),
                    two_pi: Real::zero(config),
                },
                config,
                degree: n,
                zero: Some(Complex::zero(config)),
            });
        }
        // Carry the logarithm at working precision so the division by n
        // loses nothing at the caller's precision
        let work = self.working(config);
        let principal = self.log(&widen(x, work))?.into_complex();
        let two_pi = &self.pi(work)? * 2;
        Ok(RootBranches {
            ctx: self,
            log: LogBranches { principal, two_pi },
            config,
            degree: n,
            zero: None,
        })
    }
}
