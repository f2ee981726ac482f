// ============================================================================
// Real Number
// Arbitrary-precision real arithmetic on scaled integers
// ============================================================================

use super::config::PrecisionConfig;
use super::errors::{NumericError, NumericResult};
use super::input::RealInput;
use super::scaled::{pow10, ScaledInt};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Largest scale `rust_decimal` can carry.
const DECIMAL_MAX_SCALE: i64 = 28;

/// Arbitrary-precision real number.
///
/// Stores a [`ScaledInt`] together with the [`PrecisionConfig`] that governs
/// every value derived from it. With trimming enabled, each produced result
/// keeps at most `precision` mantissa digits, truncated from the least
/// significant end.
///
/// Binary operations take the configuration of the left operand.
///
/// # Example
/// ```
/// use scaled_real::numeric::Real;
///
/// let a: Real = "1.5".parse().unwrap();
/// let b: Real = "2.25".parse().unwrap();
/// assert_eq!(&a + &b, "3.75".parse::<Real>().unwrap());
/// ```
#[derive(Clone)]
pub struct Real {
    value: ScaledInt,
    config: PrecisionConfig,
    display: Option<String>,
}

impl Real {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build a real from any accepted input.
    ///
    /// # Errors
    /// Returns `Coercion` if the input cannot be read as a number.
    pub fn new(input: impl Into<RealInput>, config: PrecisionConfig) -> NumericResult<Self> {
        let value = input.into().resolve()?;
        Ok(Self::from_scaled(value, config))
    }

    /// Build a real with the default configuration.
    pub fn with_default(input: impl Into<RealInput>) -> NumericResult<Self> {
        Self::new(input, PrecisionConfig::default())
    }

    /// Wrap a scaled integer, trimming it if the configuration asks for it.
    pub fn from_scaled(value: ScaledInt, config: PrecisionConfig) -> Self {
        let mut real = Self {
            value,
            config,
            display: None,
        };
        real.apply_trim();
        real
    }

    pub fn from_parts(mantissa: impl Into<BigInt>, offset: i64, config: PrecisionConfig) -> Self {
        Self::from_scaled(ScaledInt::new(mantissa.into(), offset), config)
    }

    pub fn from_integer(value: impl Into<BigInt>, config: PrecisionConfig) -> Self {
        Self::from_scaled(ScaledInt::from_integer(value), config)
    }

    #[inline]
    pub fn zero(config: PrecisionConfig) -> Self {
        Self::from_scaled(ScaledInt::zero(), config)
    }

    #[inline]
    pub fn one(config: PrecisionConfig) -> Self {
        Self::from_integer(1, config)
    }

    /// Copy of this value under a different configuration (re-trimmed).
    pub fn copy_with(&self, config: PrecisionConfig) -> Self {
        Self::from_scaled(self.value.clone(), config)
    }

    /// Coerce `other` into a real sharing this value's configuration.
    pub fn coerce(&self, other: impl Into<RealInput>) -> NumericResult<Self> {
        Self::new(other, self.config)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn config(&self) -> PrecisionConfig {
        self.config
    }

    #[inline]
    pub fn precision(&self) -> u32 {
        self.config.precision()
    }

    #[inline]
    pub fn scaled(&self) -> &ScaledInt {
        &self.value
    }

    #[inline]
    pub fn into_scaled(self) -> ScaledInt {
        self.value
    }

    #[inline]
    pub fn mantissa(&self) -> &BigInt {
        self.value.mantissa()
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        self.value.offset()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.value.is_negative()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.value.is_positive()
    }

    /// -1, 0 or 1
    #[inline]
    pub fn signum(&self) -> i32 {
        self.value.signum()
    }

    /// True when the value has no fractional part.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.value.is_integer()
    }

    /// Exact integer value, if the number is integer-valued.
    pub fn to_integer(&self) -> Option<BigInt> {
        self.value.to_integer()
    }

    /// Integer part, truncated toward zero.
    pub fn trunc(&self) -> BigInt {
        self.value.truncated()
    }

    /// Text shown instead of the computed formatting, if any.
    pub fn display_override(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Builder method: set a display override
    pub fn with_display(mut self, text: impl Into<String>) -> Self {
        self.display = Some(text.into());
        self
    }

    pub fn clear_display(&mut self) {
        self.display = None;
    }

    // ========================================================================
    // Trimming
    // ========================================================================

    fn apply_trim(&mut self) {
        if self.config.trim_enabled() {
            self.value.trim(self.config.precision());
        }
    }

    /// Truncate the mantissa to `precision` digits in place.
    ///
    /// # Errors
    /// Returns `Domain` if `precision` is zero.
    pub fn trim(&mut self, precision: u32) -> NumericResult<&mut Self> {
        if precision == 0 {
            return Err(NumericError::domain("precision must be a positive integer"));
        }
        self.value.trim(precision);
        self.display = None;
        Ok(self)
    }

    /// Display trim: a truncated copy, leaving `self` untouched.
    pub fn trimmed(&self, precision: u32) -> Self {
        Self {
            value: self.value.trimmed(precision.max(1)),
            config: self.config,
            display: None,
        }
    }

    /// Result of an operation on `self`, under `self`'s configuration.
    #[inline]
    fn finish(&self, value: ScaledInt) -> Self {
        Self::from_scaled(value, self.config)
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    pub fn abs(&self) -> Self {
        self.finish(self.value.abs())
    }

    /// Division with truncation of the last retained digit.
    ///
    /// The quotient is formed at an internal scale of
    /// `precision + digits(rhs) - digits(self)` and truncated, never rounded.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Real) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let widen = i64::from(self.precision()) + rhs.value.digit_len() as i64
            - self.value.digit_len() as i64;
        let widen = widen.max(0);
        let numerator = self.value.mantissa() * pow10(widen as u64);
        let quotient = numerator / rhs.value.mantissa();
        let offset = self.value.offset() + widen - rhs.value.offset();
        Ok(self.finish(ScaledInt::new(quotient, offset)))
    }

    /// `1 / self`
    pub fn reciprocal(&self) -> NumericResult<Self> {
        Self::one(self.config).checked_div(self)
    }

    /// Raise to a non-negative integer power (0 gives exactly 1).
    pub fn pow_u32(&self, exponent: u32) -> Self {
        let mut result = Self::one(self.config);
        if exponent == 0 {
            return result;
        }
        let mut base = self.clone();
        base.display = None;
        let mut e = exponent;
        loop {
            if e & 1 == 1 {
                result *= &base;
            }
            e >>= 1;
            if e == 0 {
                break;
            }
            base = &base * &base;
        }
        result
    }

    /// Raise to a signed integer power; negative exponents take the reciprocal.
    ///
    /// # Errors
    /// Returns `DivisionByZero` for a negative power of zero.
    pub fn powi(&self, exponent: i64) -> NumericResult<Self> {
        let magnitude = u32::try_from(exponent.unsigned_abs()).map_err(|_| {
            NumericError::invalid_exponent(format!("exponent {} is too large", exponent))
        })?;
        let positive = self.pow_u32(magnitude);
        if exponent < 0 {
            positive.reciprocal()
        } else {
            Ok(positive)
        }
    }

    /// Raise to an integer-valued real exponent.
    ///
    /// Non-integer exponents need logarithms; see `MathContext::pow`.
    ///
    /// # Errors
    /// Returns `InvalidExponent` if `exponent` has a fractional part.
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
        self.powi(n)
    }

    /// In-place integer power.
    pub fn pow_assign(&mut self, exponent: u32) {
        *self = self.pow_u32(exponent);
    }

    // ========================================================================
    // Mixed-operand Arithmetic
    // ========================================================================

    /// `self + other`, coercing `other` first.
    pub fn add_with(&self, other: impl Into<RealInput>) -> NumericResult<Self> {
        Ok(self + &self.coerce(other)?)
    }

    /// `self - other`, coercing `other` first.
    pub fn sub_with(&self, other: impl Into<RealInput>) -> NumericResult<Self> {
        Ok(self - &self.coerce(other)?)
    }

    /// `self * other`, coercing `other` first.
    pub fn mul_with(&self, other: impl Into<RealInput>) -> NumericResult<Self> {
        Ok(self * &self.coerce(other)?)
    }

    /// `self / other`, coercing `other` first.
    pub fn div_with(&self, other: impl Into<RealInput>) -> NumericResult<Self> {
        self.checked_div(&self.coerce(other)?)
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Lossy conversion to hardware floating point.
    pub fn to_f64(&self) -> f64 {
        format_scaled(&self.value).parse().unwrap_or(f64::NAN)
    }

    /// Convert to `rust_decimal::Decimal`, truncating digits beyond its scale.
    ///
    /// # Errors
    /// Returns `Coercion` if the value does not fit.
    pub fn to_decimal(&self) -> NumericResult<Decimal> {
        let mut value = self.value.normalized();
        if value.offset() > DECIMAL_MAX_SCALE {
            let excess = value.offset() - DECIMAL_MAX_SCALE;
            let len = value.digit_len() as i64;
            value.trim((len - excess).max(1) as u32);
            if value.offset() > DECIMAL_MAX_SCALE {
                return Ok(Decimal::ZERO);
            }
        }
        let (mantissa, offset) = if value.offset() < 0 {
            let (m, o) = value.into_parts();
            (m * pow10(o.unsigned_abs()), 0)
        } else {
            value.into_parts()
        };
        let out_of_range = || {
            NumericError::coercion(
                "decimal",
                format_scaled(&self.value),
                NumericError::domain("value out of rust_decimal range"),
            )
        };
        let raw = mantissa.to_i128().ok_or_else(out_of_range)?;
        Decimal::try_from_i128_with_scale(raw, offset as u32).map_err(|_| out_of_range())
    }

    /// Exact value as a fraction in lowest terms, denominator positive.
    pub fn reduced_fraction(&self) -> (BigInt, BigInt) {
        let value = self.value.normalized();
        if value.offset() <= 0 {
            return (self.value.truncated(), BigInt::one());
        }
        let denominator = pow10(value.offset() as u64);
        let gcd = value.mantissa().gcd(&denominator);
        (value.mantissa() / &gcd, denominator / gcd)
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Render a scaled integer as `int.frac`, or `d.ddde-N` when the value has
/// no integer digits.
pub(crate) fn format_scaled(value: &ScaledInt) -> String {
    if value.is_zero() {
        return "0.0".to_string();
    }
    let sign = if value.is_negative() { "-" } else { "" };
    let digits = value.mantissa().magnitude().to_str_radix(10);
    let len = digits.len() as i64;
    let offset = value.offset();

    if offset <= 0 {
        let zeros = "0".repeat(offset.unsigned_abs() as usize);
        format!("{}{}{}.0", sign, digits, zeros)
    } else if len > offset {
        let split = (len - offset) as usize;
        format!("{}{}.{}", sign, &digits[..split], &digits[split..])
    } else {
        let exponent = offset - len + 1;
        let (head, tail) = digits.split_at(1);
        let tail = if tail.is_empty() { "0" } else { tail };
        format!("{}{}.{}e-{}", sign, head, tail, exponent)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display {
            Some(text) => f.write_str(text),
            None => f.write_str(&format_scaled(&self.value)),
        }
    }
}

impl fmt::Debug for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Real({}, mantissa={}, offset={}, precision={})",
            format_scaled(&self.value),
            self.value.mantissa(),
            self.value.offset(),
            self.config.precision()
        )
    }
}

impl FromStr for Real {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::with_default(s)
    }
}

impl TryFrom<&Real> for PrecisionConfig {
    type Error = NumericError;

    /// Read a precision from a real value, keeping the value's trim flag.
    fn try_from(value: &Real) -> Result<Self, Self::Error> {
        let precision = value
            .to_integer()
            .filter(|n| n.is_positive())
            .and_then(|n| n.to_u32())
            .ok_or_else(|| {
                NumericError::domain(format!("precision {} is not a positive whole number", value))
            })?;
        PrecisionConfig::new(precision, value.config.trim_enabled())
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Real {}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp_value(&other.value)
    }
}

impl Hash for Real {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let normalized = self.value.normalized();
        normalized.mantissa().hash(state);
        normalized.offset().hash(state);
    }
}

// ============================================================================
// Operators
// ============================================================================

impl Neg for Real {
    type Output = Real;

    fn neg(self) -> Real {
        -&self
    }
}

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Real {
        self.finish(self.value.neg())
    }
}

impl Add<&Real> for &Real {
    type Output = Real;

    fn add(self, rhs: &Real) -> Real {
        self.finish(self.value.add(&rhs.value))
    }
}

impl Sub<&Real> for &Real {
    type Output = Real;

    fn sub(self, rhs: &Real) -> Real {
        self.finish(self.value.sub(&rhs.value))
    }
}

impl Mul<&Real> for &Real {
    type Output = Real;

    fn mul(self, rhs: &Real) -> Real {
        self.finish(self.value.mul(&rhs.value))
    }
}

// Infallible Div for ergonomics (panics on zero divisor - use checked_div)
impl Div<&Real> for &Real {
    type Output = Real;

    fn div(self, rhs: &Real) -> Real {
        self.checked_div(rhs).expect("Real division by zero")
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Real> for Real {
            type Output = Real;

            fn $method(self, rhs: Real) -> Real {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&Real> for Real {
            type Output = Real;

            fn $method(self, rhs: &Real) -> Real {
                (&self).$method(rhs)
            }
        }

        impl $imp<Real> for &Real {
            type Output = Real;

            fn $method(self, rhs: Real) -> Real {
                self.$method(&rhs)
            }
        }

        impl $imp<i64> for &Real {
            type Output = Real;

            fn $method(self, rhs: i64) -> Real {
                self.$method(&Real::from_integer(rhs, self.config))
            }
        }

        impl $imp<i64> for Real {
            type Output = Real;

            fn $method(self, rhs: i64) -> Real {
                (&self).$method(rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);

macro_rules! assign_op {
    ($imp:ident, $method:ident, $scaled:ident) => {
        impl $imp<&Real> for Real {
            fn $method(&mut self, rhs: &Real) {
                self.value = self.value.$scaled(&rhs.value);
                self.display = None;
                self.apply_trim();
            }
        }

        impl $imp<Real> for Real {
            fn $method(&mut self, rhs: Real) {
                self.$method(&rhs);
            }
        }

        impl $imp<i64> for Real {
            fn $method(&mut self, rhs: i64) {
                self.$method(&Real::from_integer(rhs, self.config));
            }
        }
    };
}

assign_op!(AddAssign, add_assign, add);
assign_op!(SubAssign, sub_assign, sub);
assign_op!(MulAssign, mul_assign, mul);

// ============================================================================
// Serialization
// ============================================================================

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{format_scaled, PrecisionConfig, Real};
    use serde::de::Error as _;
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Real {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("Real", 2)?;
            state.serialize_field("value", &format_scaled(&self.value))?;
            state.serialize_field("config", &self.config)?;
            state.end()
        }
    }

    #[derive(Deserialize)]
    struct RealRepr {
        value: String,
        config: PrecisionConfig,
    }

    impl<'de> Deserialize<'de> for Real {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = RealRepr::deserialize(deserializer)?;
            Real::new(repr.value, repr.config).map_err(D::Error::custom)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
