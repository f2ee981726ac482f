// ============================================================================
// Complex Number
// Pair of reals sharing one precision configuration
// ============================================================================

use super::parse::parse_complex;
use crate::numeric::{NumericError, NumericResult, PrecisionConfig, Real, RealInput};
use num_traits::ToPrimitive;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Accepted sources for a [`Complex`].
#[derive(Debug, Clone)]
pub enum ComplexInput {
    /// `(real, imaginary)` pair of real inputs
    Parts(RealInput, RealInput),
    /// A real value; the imaginary part is zero
    Real(RealInput),
    /// Copy of another complex number
    Copy(Complex),
    /// Text such as "a+bi", "-bi" or "i"
    Text(String),
}

impl ComplexInput {
    pub fn kind(&self) -> &'static str {
        match self {
            ComplexInput::Parts(..) => "pair",
            ComplexInput::Real(_) => "real",
            ComplexInput::Copy(_) => "complex",
            ComplexInput::Text(_) => "text",
        }
    }

    /// Cheap check that the input can be turned into a complex number.
    pub fn is_valid(&self) -> bool {
        match self {
            ComplexInput::Parts(re, im) => re.is_valid() && im.is_valid(),
            ComplexInput::Real(re) => re.is_valid(),
            ComplexInput::Copy(_) => true,
            ComplexInput::Text(text) => parse_complex(text).is_ok(),
        }
    }

    /// Resolve into a complex number under `config`.
    pub fn resolve(self, config: PrecisionConfig) -> NumericResult<Complex> {
        match self {
            ComplexInput::Parts(re, im) => Ok(Complex::from_reals(
                Real::new(re, config)?,
                Real::new(im, config)?,
            )),
            ComplexInput::Real(re) => Ok(Complex::from_real(Real::new(re, config)?)),
            ComplexInput::Copy(z) => Ok(z.copy_with(config)),
            ComplexInput::Text(text) => {
                let (re, im) = parse_complex(&text)
                    .map_err(|err| NumericError::coercion("text", text.clone(), err.into()))?;
                Ok(Complex::from_reals(
                    Real::from_scaled(re, config),
                    Real::from_scaled(im, config),
                ))
            },
        }
    }
}

impl From<&str> for ComplexInput {
    fn from(s: &str) -> Self {
        ComplexInput::Text(s.to_string())
    }
}

impl From<String> for ComplexInput {
    fn from(s: String) -> Self {
        ComplexInput::Text(s)
    }
}

impl<A: Into<RealInput>, B: Into<RealInput>> From<(A, B)> for ComplexInput {
    fn from((re, im): (A, B)) -> Self {
        ComplexInput::Parts(re.into(), im.into())
    }
}

impl From<Real> for ComplexInput {
    fn from(r: Real) -> Self {
        ComplexInput::Real(RealInput::Copy(r))
    }
}

impl From<&Real> for ComplexInput {
    fn from(r: &Real) -> Self {
        ComplexInput::Real(RealInput::Copy(r.clone()))
    }
}

impl From<i64> for ComplexInput {
    fn from(n: i64) -> Self {
        ComplexInput::Real(RealInput::from(n))
    }
}

impl From<Complex> for ComplexInput {
    fn from(z: Complex) -> Self {
        ComplexInput::Copy(z)
    }
}

impl From<&Complex> for ComplexInput {
    fn from(z: &Complex) -> Self {
        ComplexInput::Copy(z.clone())
    }
}

/// Complex number built from two [`Real`] parts.
///
/// The configuration of the real part governs the pair; the imaginary part
/// is brought onto it at construction.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex {
    re: Real,
    im: Real,
}

impl Complex {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build a complex number from any accepted input.
    ///
    /// # Errors
    /// Returns `Coercion` if either part cannot be read as a number.
    pub fn new(input: impl Into<ComplexInput>, config: PrecisionConfig) -> NumericResult<Self> {
        input.into().resolve(config)
    }

    pub fn with_default(input: impl Into<ComplexInput>) -> NumericResult<Self> {
        Self::new(input, PrecisionConfig::default())
    }

    /// Pair two reals; the imaginary part adopts the real part's configuration.
    pub fn from_reals(re: Real, im: Real) -> Self {
        let im = if im.config() == re.config() {
            im
        } else {
            im.copy_with(re.config())
        };
        Self { re, im }
    }

    /// Promote a real to a complex number with zero imaginary part.
    pub fn from_real(re: Real) -> Self {
        let im = Real::zero(re.config());
        Self { re, im }
    }

    pub fn zero(config: PrecisionConfig) -> Self {
        Self::from_real(Real::zero(config))
    }

    pub fn one(config: PrecisionConfig) -> Self {
        Self::from_real(Real::one(config))
    }

    /// The imaginary unit.
    pub fn i(config: PrecisionConfig) -> Self {
        Self {
            re: Real::zero(config),
            im: Real::one(config),
        }
    }

    pub fn copy_with(&self, config: PrecisionConfig) -> Self {
        Self {
            re: self.re.copy_with(config),
            im: self.im.copy_with(config),
        }
    }

    /// Coerce `other` into a complex number sharing this value's configuration.
    pub fn coerce(&self, other: impl Into<ComplexInput>) -> NumericResult<Self> {
        Self::new(other, self.config())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn re(&self) -> &Real {
        &self.re
    }

    #[inline]
    pub fn im(&self) -> &Real {
        &self.im
    }

    #[inline]
    pub fn into_parts(self) -> (Real, Real) {
        (self.re, self.im)
    }

    #[inline]
    pub fn config(&self) -> PrecisionConfig {
        self.re.config()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    /// True when the imaginary part is zero.
    #[inline]
    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Complex conjugate: negated imaginary part.
    pub fn conj(&self) -> Self {
        Self {
            re: self.re.clone(),
            im: -&self.im,
        }
    }

    /// `re² + im²`, kept at engine precision.
    pub fn modulus_squared(&self) -> Real {
        &(&self.re * &self.re) + &(&self.im * &self.im)
    }

    /// Division via the conjugate: `z / w = z · conj(w) / |w|²`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Complex) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let denominator = rhs.modulus_squared();
        let numerator = self * &rhs.conj();
        Ok(Self {
            re: numerator.re.checked_div(&denominator)?,
            im: numerator.im.checked_div(&denominator)?,
        })
    }

    pub fn reciprocal(&self) -> NumericResult<Self> {
        Self::one(self.config()).checked_div(self)
    }

    /// Raise to a non-negative integer power (0 gives exactly 1+0i).
    pub fn pow_u32(&self, exponent: u32) -> Self {
        let mut result = Self::one(self.config());
        for _ in 0..exponent {
            result *= self;
        }
        result
    }

    /// Raise to an integer-valued real exponent; negative powers take the
    /// reciprocal.
    ///
    /// # Errors
    /// Returns `InvalidExponent` for a fractional exponent and
    /// `DivisionByZero` for a negative power of zero.
    pub fn pow_exact(&self, exponent: &Real) -> NumericResult<Self> {
        let n = exponent
            .to_integer()
            .and_then(|n| n.to_i64())
            .ok_or_else(|| {
                NumericError::invalid_exponent(format!(
                    "{} is not an integer exponent",
                    exponent
                ))
            })?;
        let magnitude = u32::try_from(n.unsigned_abs()).map_err(|_| {
            NumericError::invalid_exponent(format!("exponent {} is too large", n))
        })?;
        let positive = self.pow_u32(magnitude);
        if n < 0 {
            positive.reciprocal()
        } else {
            Ok(positive)
        }
    }

    /// Truncate both parts to `precision` digits.
    ///
    /// # Errors
    /// Returns `Domain` if `precision` is zero.
    pub fn trim(&mut self, precision: u32) -> NumericResult<&mut Self> {
        self.re.trim(precision)?;
        self.im.trim(precision)?;
        Ok(self)
    }

    pub fn add_with(&self, other: impl Into<ComplexInput>) -> NumericResult<Self> {
        Ok(self + &self.coerce(other)?)
    }

    pub fn sub_with(&self, other: impl Into<ComplexInput>) -> NumericResult<Self> {
        Ok(self - &self.coerce(other)?)
    }

    pub fn mul_with(&self, other: impl Into<ComplexInput>) -> NumericResult<Self> {
        Ok(self * &self.coerce(other)?)
    }

    pub fn div_with(&self, other: impl Into<ComplexInput>) -> NumericResult<Self> {
        self.checked_div(&self.coerce(other)?)
    }
}

impl From<Real> for Complex {
    fn from(re: Real) -> Self {
        Self::from_real(re)
    }
}

impl FromStr for Complex {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::with_default(s)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}i", self.re, self.im)
    }
}

impl fmt::Debug for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Complex({} + {}i, precision={})", self.re, self.im, self.re.precision())
    }
}

// ============================================================================
// Operators
// ============================================================================

impl Neg for &Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex {
            re: -&self.re,
            im: -&self.im,
        }
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        -&self
    }
}

impl Add<&Complex> for &Complex {
    type Output = Complex;

    fn add(self, rhs: &Complex) -> Complex {
        Complex {
            re: &self.re + &rhs.re,
            im: &self.im + &rhs.im,
        }
    }
}

impl Sub<&Complex> for &Complex {
    type Output = Complex;

    fn sub(self, rhs: &Complex) -> Complex {
        Complex {
            re: &self.re - &rhs.re,
            im: &self.im - &rhs.im,
        }
    }
}

impl Mul<&Complex> for &Complex {
    type Output = Complex;

    fn mul(self, rhs: &Complex) -> Complex {
        let re = &(&self.re * &rhs.re) - &(&self.im * &rhs.im);
        let im = &(&self.re * &rhs.im) + &(&self.im * &rhs.re);
        Complex { re, im }
    }
}

// Infallible Div for ergonomics (panics on zero divisor - use checked_div)
impl Div<&Complex> for &Complex {
    type Output = Complex;

    fn div(self, rhs: &Complex) -> Complex {
        self.checked_div(rhs).expect("Complex division by zero")
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Complex> for Complex {
            type Output = Complex;

            fn $method(self, rhs: Complex) -> Complex {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&Complex> for Complex {
            type Output = Complex;

            fn $method(self, rhs: &Complex) -> Complex {
                (&self).$method(rhs)
            }
        }

        impl $imp<Complex> for &Complex {
            type Output = Complex;

            fn $method(self, rhs: Complex) -> Complex {
                self.$method(&rhs)
            }
        }

        // Real operands are promoted on either side
        impl $imp<&Real> for &Complex {
            type Output = Complex;

            fn $method(self, rhs: &Real) -> Complex {
                self.$method(&Complex::from_real(rhs.copy_with(self.config())))
            }
        }

        impl $imp<&Complex> for &Real {
            type Output = Complex;

            fn $method(self, rhs: &Complex) -> Complex {
                (&Complex::from_real(self.clone())).$method(rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);

macro_rules! assign_op {
    ($imp:ident, $method:ident, $op:ident) => {
        impl $imp<&Complex> for Complex {
            fn $method(&mut self, rhs: &Complex) {
                *self = (&*self).$op(rhs);
            }
        }

        impl $imp<Complex> for Complex {
            fn $method(&mut self, rhs: Complex) {
                self.$method(&rhs);
            }
        }
    };
}

assign_op!(AddAssign, add_assign, add);
assign_op!(SubAssign, sub_assign, sub);
assign_op!(MulAssign, mul_assign, mul);
