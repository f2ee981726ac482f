// ============================================================================
// Transcendental Functions
// exp, log, roots, trigonometry and general powers over reals and complexes
// ============================================================================

use super::context::MathContext;
use super::series::{is_negligible, is_negligible_complex, threshold, Factorials};
use crate::cache::MemoFunction;
use crate::complex::Complex;
use crate::interfaces::Number;
use crate::numeric::{NumericError, NumericResult, PrecisionConfig, Real};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::cmp::Ordering;

/// Divide both parts of `z` by a real.
pub(crate) fn scale_down(z: &Complex, divisor: &Real) -> NumericResult<Complex> {
    Ok(Complex::from_reals(
        z.re().checked_div(divisor)?,
        z.im().checked_div(divisor)?,
    ))
}

impl MathContext {
    // ========================================================================
    // Exponential
    // ========================================================================

    /// `e^x` for a real `x`.
    ///
    /// # Errors
    /// Returns `NotConverged` if the iteration cap is reached.
    pub fn exp(&self, x: &Real) -> NumericResult<Real> {
        self.memo_real(MemoFunction::Exp, x, || {
            let work = self.working(x.config());
            Ok(self.exp_series(&x.copy_with(work))?.copy_with(x.config()))
        })
    }

    /// Taylor series `Σ x^i / i!`; a negative argument is evaluated as
    /// `1 / e^-x` so that every term is positive.
    fn exp_series(&self, x: &Real) -> NumericResult<Real> {
        let work = x.config();
        if x.is_zero() {
            return Ok(Real::one(work));
        }
        if x.is_negative() {
            return self.exp_series(&-x)?.reciprocal();
        }

        let small = threshold(work);
        let mut guard = self.guard("exp");
        let mut sum = Real::one(work);
        let mut power = Real::one(work);
        for factorial in Factorials::new().skip(1) {
            power = &power * x;
            let term = power.checked_div(&Real::from_integer(factorial, work))?;
            sum += &term;
            if is_negligible(&term, &small) {
                break;
            }
            guard.tick()?;
        }
        guard.converged();
        Ok(sum)
    }

    /// `e^z` for a complex `z`, as `e^re(z) · e^(i·im(z))`.
    ///
    /// The modulus goes through the real series, which inverts negative
    /// arguments; the rotation is summed over `im(z)` reduced into (−π, π].
    ///
    /// # Errors
    /// Returns `NotConverged` if the iteration cap is reached.
    pub fn exp_complex(&self, z: &Complex) -> NumericResult<Complex> {
        let config = z.config();
        let work = self.working(config);
        let z = z.copy_with(work);

        let modulus = self.exp_series(z.re())?;
        if z.im().is_zero() {
            return Ok(Complex::from_real(modulus).copy_with(config));
        }
        let rotation = self.rotation_series(&self.reduce_angle(z.im())?)?;
        Ok(Complex::from_reals(&modulus * rotation.re(), &modulus * rotation.im()).copy_with(config))
    }

    /// `Σ (iθ)^k / k!` for an already reduced angle.
    fn rotation_series(&self, theta: &Real) -> NumericResult<Complex> {
        let work = theta.config();
        let step = Complex::from_reals(Real::zero(work), theta.clone());

        let small = threshold(work);
        let mut guard = self.guard("exp_complex");
        let mut sum = Complex::one(work);
        let mut power = Complex::one(work);
        for factorial in Factorials::new().skip(1) {
            power = &power * &step;
            let term = scale_down(&power, &Real::from_integer(factorial, work))?;
            sum += &term;
            if is_negligible_complex(&term, &small) {
                break;
            }
            guard.tick()?;
        }
        guard.converged();
        Ok(sum)
    }

    pub fn exp_number(&self, x: &Number) -> NumericResult<Number> {
        match x {
            Number::Real(r) => Ok(Number::Real(self.exp(r)?)),
            Number::Complex(z) => Ok(Number::Complex(self.exp_complex(z)?)),
        }
    }

    // ========================================================================
    // Logarithm
    // ========================================================================

    /// `Σ u^k / k` for `0 <= u <= 1/2`, which is `-log(1 - u)`.
    pub(crate) fn log_series(&self, u: &Real) -> NumericResult<Real> {
        let work = u.config();
        let small = threshold(work);
        let mut guard = self.guard("log");
        let mut sum = Real::zero(work);
        let mut power = Real::one(work);
        let mut k: i64 = 1;
        loop {
            power = &power * u;
            let term = power.checked_div(&Real::from_integer(k, work))?;
            sum += &term;
            if is_negligible(&term, &small) {
                break;
            }
            guard.tick()?;
            k += 1;
        }
        guard.converged();
        Ok(sum)
    }

    /// Natural logarithm of a positive real.
    ///
    /// # Errors
    /// Returns `Domain` for zero or a negative argument; use [`Self::log`]
    /// for the complex branch.
    pub fn log_real(&self, x: &Real) -> NumericResult<Real> {
        match x.signum() {
            0 => return Err(NumericError::domain("log of zero is undefined")),
            -1 => {
                return Err(NumericError::domain(format!(
                    "log of negative real {} has no real value",
                    x
                )))
            },
            _ => {},
        }
        self.memo_real(MemoFunction::Log, x, || {
            let config = x.config();
            let work = self.working(config);
            Ok(self.log_positive(&x.copy_with(work))?.copy_with(config))
        })
    }

    /// Reduce into `[1/2, 2]` by powers of two, sum the series for the
    /// reduced value and add back `n * log 2`.
    fn log_positive(&self, x: &Real) -> NumericResult<Real> {
        let work = x.config();
        let one = Real::one(work);
        let two = Real::from_integer(2, work);
        let half = Real::from_parts(5, 1, work);

        let mut y = x.clone();
        let mut shifts: i64 = 0;
        let reduced = match y.cmp(&one) {
            Ordering::Equal => return Ok(Real::zero(work)),
            Ordering::Greater => {
                while y > two {
                    y = &y * &half;
                    shifts += 1;
                }
                // y in (1, 2]: log y = Σ u^k/k with u = 1 - 1/y
                self.log_series(&(&one - &y.reciprocal()?))?
            },
            Ordering::Less => {
                while y < half {
                    y = &y * &two;
                    shifts -= 1;
                }
                // y in [1/2, 1): log y = -Σ u^k/k with u = 1 - y
                -&self.log_series(&(&one - &y))?
            },
        };

        if shifts == 0 {
            return Ok(reduced);
        }
        let ln2 = self.ln2(work)?;
        Ok(&reduced + &(&ln2 * shifts))
    }

    /// Principal logarithm `log|z| + i·arg(z)` with the imaginary part in
    /// (−π, π].
    ///
    /// # Errors
    /// Returns `Domain` for zero.
    pub fn log_complex(&self, z: &Complex) -> NumericResult<Complex> {
        if z.is_zero() {
            return Err(NumericError::domain("log of zero is undefined"));
        }
        if z.is_real() && z.re().is_positive() {
            return Ok(Complex::from_real(self.log_real(z.re())?));
        }
        let config = z.config();
        let work = self.working(config);
        let z = z.copy_with(work);
        // log|z| = log(|z|²) / 2
        let half = Real::from_parts(5, 1, work);
        let magnitude = &self.log_positive(&z.modulus_squared())? * &half;
        let angle = self.theta(&z)?;
        Ok(Complex::from_reals(magnitude, angle).copy_with(config))
    }

    /// Logarithm of either kind; a negative real yields a complex result.
    ///
    /// # Errors
    /// Returns `Domain` for zero.
    pub fn log(&self, x: &Number) -> NumericResult<Number> {
        match x {
            Number::Real(r) if r.is_positive() => Ok(Number::Real(self.log_real(r)?)),
            Number::Real(r) if r.is_zero() => Err(NumericError::domain("log of zero is undefined")),
            other => Ok(Number::Complex(self.log_complex(&other.promote())?)),
        }
    }

    // ========================================================================
    // Roots
    // ========================================================================

    /// Square root of a non-negative real.
    ///
    /// # Errors
    /// Returns `Domain` for a negative argument.
    pub fn sqrt_real(&self, x: &Real) -> NumericResult<Real> {
        if x.is_zero() {
            return Ok(Real::zero(x.config()));
        }
        if x.is_negative() {
            return Err(NumericError::domain(format!(
                "square root of negative real {} has no real value",
                x
            )));
        }
        self.memo_real(MemoFunction::Sqrt, x, || self.root_positive(x, 2))
    }

    /// Principal square root; negative reals give an imaginary result.
    pub fn sqrt(&self, x: &Number) -> NumericResult<Number> {
        self.root(x, 2)
    }

    /// Principal `n`th root, `exp(log(x) / n)`.
    ///
    /// # Errors
    /// Returns `Domain` when `n` is zero.
    pub fn root(&self, x: &Number, n: u32) -> NumericResult<Number> {
        if n == 0 {
            return Err(NumericError::domain("zeroth root is undefined"));
        }
        match x {
            Number::Real(r) if r.is_zero() => Ok(Number::Real(Real::zero(r.config()))),
            Number::Real(r) if r.is_positive() && n == 2 => Ok(Number::Real(self.sqrt_real(r)?)),
            Number::Real(r) if r.is_positive() => Ok(Number::Real(self.root_positive(r, n)?)),
            other => Ok(Number::Complex(self.root_complex(&other.promote(), n)?)),
        }
    }

    fn root_positive(&self, x: &Real, n: u32) -> NumericResult<Real> {
        let config = x.config();
        let work = self.working(config);
        let log = self.log_positive(&x.copy_with(work))?;
        let scaled = log.checked_div(&Real::from_integer(n, work))?;
        Ok(self.exp_series(&scaled)?.copy_with(config))
    }

    fn root_complex(&self, z: &Complex, n: u32) -> NumericResult<Complex> {
        if z.is_zero() {
            return Ok(Complex::zero(z.config()));
        }
        let config = z.config();
        let work = self.working(config);
        let log = self.log_complex(&z.copy_with(work))?;
        let scaled = scale_down(&log, &Real::from_integer(n, work))?;
        Ok(self.exp_complex(&scaled)?.copy_with(config))
    }

    // ========================================================================
    // Trigonometry
    // ========================================================================

    /// Reduce an angle into (−π, π].
    pub(crate) fn reduce_angle(&self, theta: &Real) -> NumericResult<Real> {
        let work = theta.config();
        let pi = self.pi(work)?;
        let two_pi = &pi * 2;
        let neg_pi = -&pi;
        if *theta > neg_pi && *theta <= pi {
            return Ok(theta.clone());
        }
        let turns = theta.checked_div(&two_pi)?.trunc();
        let mut angle = theta - &(&two_pi * &Real::from_integer(turns, work));
        while angle > pi {
            angle -= &two_pi;
        }
        while angle <= neg_pi {
            angle += &two_pi;
        }
        Ok(angle)
    }

    /// Taylor series over the factorials of one parity with alternating
    /// signs: odd indices give sine, even indices give cosine.
    fn trig_series(&self, theta: &Real, parity: usize, series: &'static str) -> NumericResult<Real> {
        let work = theta.config();
        let small = threshold(work);
        let mut guard = self.guard(series);
        let mut sum = Real::zero(work);
        let mut power = Real::one(work);
        let mut sequence = 0usize;
        for (index, factorial) in Factorials::new().enumerate() {
            if index % 2 == parity {
                let term = power.checked_div(&Real::from_integer(factorial, work))?;
                if sequence % 2 == 0 {
                    sum += &term;
                } else {
                    sum -= &term;
                }
                sequence += 1;
                if is_negligible(&term, &small) {
                    break;
                }
                guard.tick()?;
            }
            power = &power * theta;
        }
        guard.converged();
        Ok(sum)
    }

    /// Sine of a real angle in radians.
    pub fn sin(&self, theta: &Real) -> NumericResult<Real> {
        self.memo_real(MemoFunction::Sin, theta, || {
            let config = theta.config();
            let angle = self.reduce_angle(&theta.copy_with(self.working(config)))?;
            Ok(self.trig_series(&angle, 1, "sin")?.copy_with(config))
        })
    }

    /// Cosine of a real angle in radians.
    pub fn cos(&self, theta: &Real) -> NumericResult<Real> {
        self.memo_real(MemoFunction::Cos, theta, || {
            let config = theta.config();
            let angle = self.reduce_angle(&theta.copy_with(self.working(config)))?;
            Ok(self.trig_series(&angle, 0, "cos")?.copy_with(config))
        })
    }

    /// `Σ (-1)^k x^(2k+1) / (2k+1)`, valid for |x| < 1.
    fn arctan_series(&self, x: &Real) -> NumericResult<Real> {
        let work = x.config();
        let small = threshold(work);
        let mut guard = self.guard("arctan");
        let square = x * x;
        let mut sum = Real::zero(work);
        let mut power = x.clone();
        let mut k: i64 = 0;
        loop {
            let term = power.checked_div(&Real::from_integer(2 * k + 1, work))?;
            if k % 2 == 0 {
                sum += &term;
            } else {
                sum -= &term;
            }
            if is_negligible(&term, &small) {
                break;
            }
            guard.tick()?;
            power = &power * &square;
            k += 1;
        }
        guard.converged();
        Ok(sum)
    }

    fn arctan_working(&self, x: &Real) -> NumericResult<Real> {
        let work = x.config();
        if x.is_zero() {
            return Ok(Real::zero(work));
        }
        if x.abs() < Real::one(work) {
            return self.arctan_series(x);
        }
        // arctan x = sign(x)·π/2 − arctan(1/x)
        let half_pi = &self.pi(work)? * &Real::from_parts(5, 1, work);
        let inner = self.arctan_series(&x.reciprocal()?)?;
        if x.is_negative() {
            Ok(&(-&half_pi) - &inner)
        } else {
            Ok(&half_pi - &inner)
        }
    }

    /// Arctangent in radians.
    ///
    /// The series slows down without bound as |x| approaches 1; at |x| = 1
    /// it reports `NotConverged` rather than running past the cap.
    pub fn arctan(&self, x: &Real) -> NumericResult<Real> {
        self.memo_real(MemoFunction::Arctan, x, || {
            let config = x.config();
            Ok(self.arctan_working(&x.copy_with(self.working(config)))?.copy_with(config))
        })
    }

    /// Four-quadrant argument of `z` in (−π, π]; the argument of zero is 0.
    pub fn theta(&self, z: &Complex) -> NumericResult<Real> {
        let config = z.config();
        let work = self.working(config);
        let (re, im) = (z.re().copy_with(work), z.im().copy_with(work));

        let angle = match (re.signum(), im.signum()) {
            (0, 0) => return Ok(Real::zero(config)),
            (0, sign) => {
                let half_pi = &self.pi(work)? * &Real::from_parts(5, 1, work);
                if sign > 0 {
                    half_pi
                } else {
                    -&half_pi
                }
            },
            (1, _) => self.arctan_working(&im.checked_div(&re)?)?,
            (_, sign) => {
                let base = self.arctan_working(&im.checked_div(&re)?)?;
                let pi = self.pi(work)?;
                if sign >= 0 {
                    &base + &pi
                } else {
                    &base - &pi
                }
            },
        };
        Ok(self.reduce_angle(&angle)?.copy_with(config))
    }

    /// `|z|`, the square root of the modulus squared.
    pub fn modulus(&self, z: &Complex) -> NumericResult<Real> {
        self.sqrt_real(&z.modulus_squared())
    }

    // ========================================================================
    // Powers
    // ========================================================================

    /// `base ^ exponent` for any mix of real and complex operands.
    ///
    /// Integer-valued real exponents use exact repeated multiplication; other
    /// exponents go through `exp(log(base) * exponent)`.
    ///
    /// # Errors
    /// Returns `Domain` for a zero base with a non-integer exponent, and
    /// `DivisionByZero` for a negative integer power of zero.
    pub fn pow(&self, base: &Number, exponent: &Number) -> NumericResult<Number> {
        if let Some(n) = exponent.as_real().filter(Real::is_integer) {
            return match base {
                Number::Real(b) => Ok(Number::Real(b.pow_exact(&n)?)),
                Number::Complex(z) => Ok(Number::Complex(z.pow_exact(&n)?)),
            };
        }
        if let (Number::Real(b), Number::Real(e)) = (base, exponent) {
            if b.is_zero() && e.is_positive() {
                return Ok(Number::Real(Real::zero(b.config())));
            }
        }

        let config = base.config();
        let work = self.working(config);
        let log = self.log(&widen(base, work))?;
        let product = &log * &widen(exponent, work);
        let result = self.exp_number(&product)?;
        Ok(widen(&result, config))
    }

    /// Real power with a real exponent; the result must be real.
    ///
    /// # Errors
    /// Returns `Domain` when a negative base meets a non-integer exponent.
    pub fn pow_real(&self, base: &Real, exponent: &Real) -> NumericResult<Real> {
        if !exponent.is_integer() && base.is_negative() {
            return Err(NumericError::domain(format!(
                "{} ^ {} has no real value",
                base, exponent
            )));
        }
        match self.pow(&Number::Real(base.clone()), &Number::Real(exponent.clone()))? {
            Number::Real(r) => Ok(r),
            Number::Complex(z) => Err(NumericError::domain(format!(
                "{} ^ {} = {} is not real",
                base, exponent, z
            ))),
        }
    }
}

/// Copy a number into another configuration.
pub(crate) fn widen(x: &Number, config: PrecisionConfig) -> Number {
    match x {
        Number::Real(r) => Number::Real(r.copy_with(config)),
        Number::Complex(z) => Number::Complex(z.copy_with(config)),
    }
}

// ============================================================================
// Convenience methods
// ============================================================================

impl Complex {
    /// Argument in (−π, π].
    pub fn theta(&self, ctx: &MathContext) -> NumericResult<Real> {
        ctx.theta(self)
    }

    pub fn modulus(&self, ctx: &MathContext) -> NumericResult<Real> {
        ctx.modulus(self)
    }

    /// General power; see [`MathContext::pow`].
    pub fn pow(&self, exponent: &Number, ctx: &MathContext) -> NumericResult<Complex> {
        Ok(ctx.pow(&Number::Complex(self.clone()), exponent)?.into_complex())
    }
}

impl Real {
    /// Real power with a possibly fractional exponent.
    pub fn powf(&self, exponent: &Real, ctx: &MathContext) -> NumericResult<Real> {
        ctx.pow_real(self, exponent)
    }
}

/// Number of distinct values of `x^(1/degree)`: the numerator of `degree` in
/// lowest terms.
///
/// # Errors
/// Returns `Domain` for a zero degree.
pub fn distinct_roots(degree: &Real) -> NumericResult<BigInt> {
    if degree.is_zero() {
        return Err(NumericError::domain("root of degree zero is undefined"));
    }
    let (numerator, _) = degree.reduced_fraction();
    Ok(numerator.magnitude().clone().into())
}

/// Branch index from a real, which must be integer-valued.
pub(crate) fn branch_index(k: &Real) -> NumericResult<i64> {
    k.to_integer()
        .and_then(|n| n.to_i64())
        .ok_or_else(|| NumericError::invalid_exponent(format!("branch index {} is not an integer", k)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(precision: u32) -> PrecisionConfig {
        PrecisionConfig::new(precision, true).unwrap()
    }

    fn r(s: &str) -> Real {
        Real::new(s, cfg(30)).unwrap()
    }

    fn close(a: &Real, b: &Real, places: i64) -> bool {
        let diff = (a - b).abs();
        diff < Real::from_parts(1, places, a.config())
    }

    #[test]
    fn test_exp_known_values() {
        let ctx = MathContext::new();
        assert_eq!(ctx.exp(&r("0")).unwrap(), r("1"));
        let e = ctx.exp(&r("1")).unwrap();
        assert!(close(&e, &r("2.71828182845904523536028747135"), 28));
        let inv = ctx.exp(&r("-1")).unwrap();
        assert!(close(&inv, &r("0.367879441171442321595523770161"), 28));
    }

    #[test]
    fn test_log_known_values() {
        let ctx = MathContext::new();
        assert_eq!(ctx.log_real(&r("1")).unwrap(), r("0"));
        let ln10 = ctx.log_real(&r("10")).unwrap();
        assert!(close(&ln10, &r("2.30258509299404568401799145468"), 27));
        let ln_tenth = ctx.log_real(&r("0.1")).unwrap();
        assert!(close(&ln_tenth, &r("-2.30258509299404568401799145468"), 27));
        let ln_half = ctx.log_real(&r("0.5")).unwrap();
        assert!(close(&ln_half, &r("-0.693147180559945309417232121458"), 28));
    }

    #[test]
    fn test_log_domain() {
        let ctx = MathContext::new();
        assert!(matches!(ctx.log_real(&r("0")), Err(NumericError::Domain(_))));
        assert!(matches!(ctx.log_real(&r("-2")), Err(NumericError::Domain(_))));
        assert!(ctx.log(&Number::Real(r("0"))).is_err());
        assert!(ctx.log_complex(&Complex::zero(cfg(30))).is_err());
    }

    #[test]
    fn test_log_of_negative_is_complex() {
        let ctx = MathContext::new();
        let value = ctx.log(&Number::Real(r("-1"))).unwrap().into_complex();
        let pi = ctx.pi(cfg(30)).unwrap();
        assert!(close(value.re(), &r("0"), 28));
        assert!(close(value.im(), &pi, 28));
    }

    #[test]
    fn test_sqrt() {
        let ctx = MathContext::new();
        let root2 = ctx.sqrt_real(&r("2")).unwrap();
        assert!(close(&root2, &r("1.41421356237309504880168872420"), 28));
        assert_eq!(ctx.sqrt_real(&r("0")).unwrap(), r("0"));
        assert!(ctx.sqrt_real(&r("-4")).is_err());

        let imaginary = ctx.sqrt(&Number::Real(r("-4"))).unwrap().into_complex();
        assert!(close(imaginary.re(), &r("0"), 27));
        assert!(close(imaginary.im(), &r("2"), 27));
    }

    #[test]
    fn test_root() {
        let ctx = MathContext::new();
        let cube = ctx.root(&Number::Real(r("27")), 3).unwrap();
        assert!(close(&cube.as_real().unwrap(), &r("3"), 27));
        assert!(matches!(
            ctx.root(&Number::Real(r("27")), 0),
            Err(NumericError::Domain(_))
        ));
        let zero = ctx.root(&Number::Real(r("0")), 5).unwrap();
        assert!(zero.is_zero());
    }

    #[test]
    fn test_sin_cos() {
        let ctx = MathContext::new();
        assert_eq!(ctx.sin(&r("0")).unwrap(), r("0"));
        assert_eq!(ctx.cos(&r("0")).unwrap(), r("1"));
        let s = ctx.sin(&r("1")).unwrap();
        assert!(close(&s, &r("0.841470984807896506652502321630"), 28));
        let c = ctx.cos(&r("1")).unwrap();
        assert!(close(&c, &r("0.540302305868139717400936607443"), 28));
    }

    #[test]
    fn test_trig_reduces_large_angles() {
        let ctx = MathContext::new();
        let pi = ctx.pi(cfg(30)).unwrap();
        let far = &r("1") + &(&pi * 200);
        let s = ctx.sin(&far).unwrap();
        assert!(close(&s, &r("0.841470984807896506652502321630"), 25));
        let reduced = ctx.reduce_angle(&(&pi * 3)).unwrap();
        assert!(close(&reduced, &pi, 27));
    }

    #[test]
    fn test_arctan() {
        let ctx = MathContext::new();
        let small = ctx.arctan(&r("0.5")).unwrap();
        assert!(close(&small, &r("0.463647609000806116214256231461"), 28));
        let large = ctx.arctan(&r("2")).unwrap();
        assert!(close(&large, &r("1.10714871779409050301706546018"), 27));
        let negative = ctx.arctan(&r("-2")).unwrap();
        assert!(close(&negative, &r("-1.10714871779409050301706546018"), 27));
    }

    #[test]
    fn test_arctan_at_one_hits_cap() {
        let ctx = MathContext::new().with_max_iterations(500);
        assert!(matches!(
            ctx.arctan(&r("1")),
            Err(NumericError::NotConverged { series: "arctan", .. })
        ));
    }

    #[test]
    fn test_theta_quadrants() {
        let ctx = MathContext::new();
        let pi = ctx.pi(cfg(30)).unwrap();
        let z = |s: &str| Complex::new(s, cfg(30)).unwrap();

        assert_eq!(ctx.theta(&z("0")).unwrap(), r("0"));
        assert!(close(&ctx.theta(&z("-1")).unwrap(), &pi, 28));
        assert!(close(&ctx.theta(&z("i")).unwrap(), &(&pi * &r("0.5")), 28));
        assert!(close(&ctx.theta(&z("-i")).unwrap(), &(&pi * &r("-0.5")), 28));

        let second = ctx.theta(&z("-2+1i")).unwrap();
        assert!(close(&second, &(&pi - &ctx.arctan(&r("0.5")).unwrap()), 27));
        let third = ctx.theta(&z("-2-1i")).unwrap();
        assert!(close(&third, &(&ctx.arctan(&r("0.5")).unwrap() - &pi), 27));
    }

    #[test]
    fn test_modulus() {
        let ctx = MathContext::new();
        let z = Complex::new("3+4i", cfg(30)).unwrap();
        assert!(close(&z.modulus(&ctx).unwrap(), &r("5"), 27));
    }

    #[test]
    fn test_exp_complex_euler() {
        let ctx = MathContext::new();
        let pi = ctx.pi(cfg(30)).unwrap();
        let i_pi = Complex::from_reals(r("0"), pi);
        let value = ctx.exp_complex(&i_pi).unwrap();
        assert!(close(value.re(), &r("-1"), 26));
        assert!(close(value.im(), &r("0"), 26));
    }

    #[test]
    fn test_exp_complex_large_negative_real_part() {
        let ctx = MathContext::new();
        let value = ctx
            .exp_complex(&Complex::new("-50", cfg(30)).unwrap())
            .unwrap();
        let expected = ctx.exp(&r("-50")).unwrap();
        // e^-50 is about 1.93e-22; compare to 25 significant digits
        assert!(close(value.re(), &expected, 47));
        assert!(value.im().is_zero());
    }

    #[test]
    fn test_exp_complex_wraps_large_imaginary_part() {
        let ctx = MathContext::new();
        let pi = ctx.pi(cfg(30)).unwrap();
        let z = Complex::from_reals(r("-30"), &pi * 21);
        let value = ctx.exp_complex(&z).unwrap();
        let expected = -ctx.exp(&r("-30")).unwrap();
        assert!(close(value.re(), &expected, 37));
        assert!(close(value.im(), &r("0"), 37));
    }

    #[test]
    fn test_sqrt_of_tiny_negative() {
        let ctx = MathContext::new();
        let value = ctx.sqrt(&Number::Real(r("-1e-40"))).unwrap().into_complex();
        assert!(close(value.re(), &r("0"), 45));
        assert!(close(value.im(), &r("1e-20"), 45));
    }

    #[test]
    fn test_pow_of_small_negative_base() {
        let ctx = MathContext::new();
        let value = ctx
            .pow(&Number::Real(r("-0.001")), &Number::Real(r("10.5")))
            .unwrap()
            .into_complex();
        // |(-0.001)^10.5|^2 = 10^-63
        assert!(close(&value.modulus_squared(), &r("1e-63"), 83));
        assert!(close(value.re(), &r("0"), 45));
    }

    #[test]
    fn test_pow_real_rejects_complex_result() {
        let ctx = MathContext::new().with_memo();
        assert!(matches!(
            ctx.pow_real(&r("-2"), &r("0.5")),
            Err(NumericError::Domain(_))
        ));
        assert_eq!(ctx.pow_real(&r("-2"), &r("3")).unwrap(), r("-8"));
    }

    #[test]
    fn test_pow_integer_is_exact() {
        let ctx = MathContext::new();
        let value = ctx
            .pow(&Number::Real(r("1.5")), &Number::Real(r("3")))
            .unwrap();
        assert_eq!(value, Number::Real(r("3.375")));
        let inverse = ctx
            .pow(&Number::Real(r("2")), &Number::Real(r("-2")))
            .unwrap();
        assert_eq!(inverse, Number::Real(r("0.25")));
    }

    #[test]
    fn test_pow_fractional() {
        let ctx = MathContext::new();
        let root2 = r("2").powf(&r("0.5"), &ctx).unwrap();
        assert!(close(&root2, &ctx.sqrt_real(&r("2")).unwrap(), 27));
        assert_eq!(r("0").powf(&r("0.5"), &ctx).unwrap(), r("0"));
        assert!(r("-8").powf(&r("0.5"), &ctx).is_err());

        let complex = ctx
            .pow(&Number::Real(r("-4")), &Number::Real(r("0.5")))
            .unwrap()
            .into_complex();
        assert!(close(complex.im(), &r("2"), 26));
    }

    #[test]
    fn test_distinct_roots() {
        let cfg = cfg(10);
        assert_eq!(distinct_roots(&Real::new("3", cfg).unwrap()).unwrap(), BigInt::from(3));
        assert_eq!(distinct_roots(&Real::new("1.5", cfg).unwrap()).unwrap(), BigInt::from(3));
        assert_eq!(distinct_roots(&Real::new("-2", cfg).unwrap()).unwrap(), BigInt::from(2));
        assert!(distinct_roots(&Real::new("0", cfg).unwrap()).is_err());
    }

    #[test]
    fn test_memo_reuses_results() {
        let ctx = MathContext::new().with_memo();
        let first = ctx.exp(&r("2")).unwrap();
        assert_eq!(ctx.memo().map(|m| m.len()), Some(1));
        assert_eq!(ctx.exp(&r("2")).unwrap(), first);
        assert_eq!(ctx.memo().map(|m| m.len()), Some(1));
        ctx.clear_caches();
        assert_eq!(ctx.memo().map(|m| m.is_empty()), Some(true));
    }
}
