// ============================================================================
// Operand Interface
// Explicit dispatch between real and complex operands
// ============================================================================

use crate::complex::{parse_complex, Complex, ComplexInput};
use crate::numeric::{NumericResult, PrecisionConfig, Real, RealInput};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Capability check performed before an operand is converted.
///
/// Mixed-type operations ask first and convert second, so a failed
/// conversion is never used to pick the other operand's path.
pub trait Coercible {
    /// Whether the value can be read as a real number.
    fn can_coerce_real(&self) -> bool;

    /// Whether the value can be read as a complex number.
    fn can_coerce_complex(&self) -> bool;
}

impl Coercible for RealInput {
    fn can_coerce_real(&self) -> bool {
        self.is_valid()
    }

    fn can_coerce_complex(&self) -> bool {
        self.is_valid()
    }
}

impl Coercible for ComplexInput {
    fn can_coerce_real(&self) -> bool {
        match self {
            ComplexInput::Real(re) => re.is_valid(),
            ComplexInput::Parts(re, im) => {
                re.is_valid() && im.clone().resolve().is_ok_and(|v| v.is_zero())
            },
            ComplexInput::Copy(z) => z.is_real(),
            ComplexInput::Text(text) => {
                parse_complex(text).is_ok_and(|(_, im)| im.is_zero())
            },
        }
    }

    fn can_coerce_complex(&self) -> bool {
        self.is_valid()
    }
}

/// A value that is either real or complex.
///
/// Functions whose result kind depends on the argument (logarithms and
/// roots of negative reals, general powers) return a `Number`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Number {
    Real(Real),
    Complex(Complex),
}

impl Number {
    /// Read text as a real if possible, otherwise as a complex number.
    pub fn parse(text: &str, config: PrecisionConfig) -> NumericResult<Self> {
        let input = RealInput::from(text);
        if input.can_coerce_real() {
            Ok(Number::Real(Real::new(input, config)?))
        } else {
            Ok(Number::Complex(Complex::new(text, config)?))
        }
    }

    pub fn config(&self) -> PrecisionConfig {
        match self {
            Number::Real(r) => r.config(),
            Number::Complex(z) => z.config(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Real(r) => r.is_zero(),
            Number::Complex(z) => z.is_zero(),
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Number::Complex(_))
    }

    /// Explicit promotion to a complex value.
    pub fn promote(&self) -> Complex {
        match self {
            Number::Real(r) => Complex::from_real(r.clone()),
            Number::Complex(z) => z.clone(),
        }
    }

    pub fn into_complex(self) -> Complex {
        match self {
            Number::Real(r) => Complex::from_real(r),
            Number::Complex(z) => z,
        }
    }

    /// The real value, if the imaginary part is absent or zero.
    pub fn as_real(&self) -> Option<Real> {
        match self {
            Number::Real(r) => Some(r.clone()),
            Number::Complex(z) if z.is_real() => Some(z.re().clone()),
            Number::Complex(_) => None,
        }
    }

    /// Coerce an operand under this value's configuration, staying real when
    /// both sides allow it.
    pub fn coerce(&self, other: impl Into<ComplexInput>) -> NumericResult<Number> {
        let other = other.into();
        let config = self.config();
        match (self, other) {
            (Number::Real(_), ComplexInput::Real(re)) => Ok(Number::Real(Real::new(re, config)?)),
            (Number::Real(_), ComplexInput::Text(text))
                if RealInput::from(text.as_str()).can_coerce_real() =>
            {
                Ok(Number::Real(Real::new(text, config)?))
            },
            (_, other) => Ok(Number::Complex(other.resolve(config)?)),
        }
    }

    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Number) -> NumericResult<Number> {
        match (self, rhs) {
            (Number::Real(a), Number::Real(b)) => Ok(Number::Real(a.checked_div(b)?)),
            _ => Ok(Number::Complex(self.promote().checked_div(&rhs.promote())?)),
        }
    }

    pub fn add_with(&self, other: impl Into<ComplexInput>) -> NumericResult<Number> {
        Ok(self + &self.coerce(other)?)
    }

    pub fn sub_with(&self, other: impl Into<ComplexInput>) -> NumericResult<Number> {
        Ok(self - &self.coerce(other)?)
    }

    pub fn mul_with(&self, other: impl Into<ComplexInput>) -> NumericResult<Number> {
        Ok(self * &self.coerce(other)?)
    }

    pub fn div_with(&self, other: impl Into<ComplexInput>) -> NumericResult<Number> {
        self.checked_div(&self.coerce(other)?)
    }
}

// Real with real stays real; any complex operand promotes the other side.
macro_rules! number_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<&Number> for &Number {
            type Output = Number;

            fn $method(self, rhs: &Number) -> Number {
                match (self, rhs) {
                    (Number::Real(a), Number::Real(b)) => Number::Real(a.$method(b)),
                    _ => Number::Complex(self.promote().$method(&rhs.promote())),
                }
            }
        }
    };
}

number_binop!(Add, add);
number_binop!(Sub, sub);
number_binop!(Mul, mul);

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Real(r) => Number::Real(-r),
            Number::Complex(z) => Number::Complex(-z),
        }
    }
}

impl From<Real> for Number {
    fn from(r: Real) -> Self {
        Number::Real(r)
    }
}

impl From<Complex> for Number {
    fn from(z: Complex) -> Self {
        Number::Complex(z)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Real(r) => r.fmt(f),
            Number::Complex(z) => z.fmt(f),
        }
    }
}
