// ============================================================================
// Real Inputs
// Tagged union over everything a real number can be built from
// ============================================================================

use super::errors::{NumericError, NumericResult, ParseError};
use super::real::Real;
use super::scaled::ScaledInt;
use num_bigint::BigInt;
use rust_decimal::Decimal;

/// Accepted sources for a [`Real`].
///
/// Each variant has exactly one conversion into a scaled integer, resolved
/// once at construction time.
#[derive(Debug, Clone)]
pub enum RealInput {
    /// Decimal text: `[+|-]digits[.digits][e[+|-]N]`
    Text(String),
    /// Raw `(mantissa, offset)` pair
    Parts(BigInt, i64),
    /// Plain integer (offset 0)
    Integer(BigInt),
    /// Copy of another real; the target configuration replaces the source's
    Copy(Real),
    /// Explicit interop with `rust_decimal`
    Decimal(Decimal),
}

impl RealInput {
    /// Short name of the variant, used in coercion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            RealInput::Text(_) => "text",
            RealInput::Parts(..) => "parts",
            RealInput::Integer(_) => "integer",
            RealInput::Copy(_) => "real",
            RealInput::Decimal(_) => "decimal",
        }
    }

    /// Convert into a scaled integer.
    ///
    /// # Errors
    /// Text that is not a decimal literal yields a `Coercion` error carrying
    /// the text and the parse failure.
    pub fn resolve(self) -> NumericResult<ScaledInt> {
        match self {
            RealInput::Text(text) => parse_decimal(&text)
                .map_err(|err| NumericError::coercion("text", text.clone(), err.into())),
            RealInput::Parts(mantissa, offset) => Ok(ScaledInt::new(mantissa, offset)),
            RealInput::Integer(value) => Ok(ScaledInt::from_integer(value)),
            RealInput::Copy(real) => Ok(real.into_scaled()),
            RealInput::Decimal(d) => Ok(ScaledInt::new(
                BigInt::from(d.mantissa()),
                i64::from(d.scale()),
            )),
        }
    }

    /// Cheap check that [`RealInput::resolve`] will succeed.
    pub fn is_valid(&self) -> bool {
        match self {
            RealInput::Text(text) => parse_decimal(text).is_ok(),
            _ => true,
        }
    }
}

impl From<&str> for RealInput {
    fn from(s: &str) -> Self {
        RealInput::Text(s.to_string())
    }
}

impl From<String> for RealInput {
    fn from(s: String) -> Self {
        RealInput::Text(s)
    }
}

impl From<&String> for RealInput {
    fn from(s: &String) -> Self {
        RealInput::Text(s.clone())
    }
}

macro_rules! integer_input {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RealInput {
                fn from(v: $t) -> Self {
                    RealInput::Integer(BigInt::from(v))
                }
            }
        )*
    };
}

integer_input!(i32, i64, u32, u64, BigInt);

impl From<(i64, i64)> for RealInput {
    fn from((mantissa, offset): (i64, i64)) -> Self {
        RealInput::Parts(BigInt::from(mantissa), offset)
    }
}

impl From<(BigInt, i64)> for RealInput {
    fn from((mantissa, offset): (BigInt, i64)) -> Self {
        RealInput::Parts(mantissa, offset)
    }
}

impl From<Real> for RealInput {
    fn from(r: Real) -> Self {
        RealInput::Copy(r)
    }
}

impl From<&Real> for RealInput {
    fn from(r: &Real) -> Self {
        RealInput::Copy(r.clone())
    }
}

impl From<Decimal> for RealInput {
    fn from(d: Decimal) -> Self {
        RealInput::Decimal(d)
    }
}

// ============================================================================
// Decimal Text Parsing
// ============================================================================

/// Parse decimal text into a scaled integer.
///
/// # Examples
/// - "1.5" -> (15, 1)
/// - "-.25" -> (-25, 2)
/// - "12" -> (12, 0)
/// - "3.0e-4" -> (30, 5)
pub fn parse_decimal(text: &str) -> Result<ScaledInt, ParseError> {
    let s = text.trim();
    let lead = text.len() - text.trim_start().len();

    let (negative, body, sign_len) = if let Some(rest) = s.strip_prefix('-') {
        (true, rest, 1)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest, 1)
    } else {
        (false, s, 0)
    };

    let (digits_part, exp_part) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let mut digits = String::with_capacity(digits_part.len());
    let mut frac_len: i64 = 0;
    let mut seen_point = false;
    for (i, ch) in digits_part.char_indices() {
        match ch {
            '0'..='9' => {
                digits.push(ch);
                if seen_point {
                    frac_len += 1;
                }
            },
            '.' if seen_point => return Err(ParseError::MultiplePoints),
            '.' => seen_point = true,
            _ => {
                return Err(ParseError::UnexpectedChar {
                    ch,
                    position: lead + sign_len + i,
                })
            },
        }
    }
    if digits.is_empty() {
        return Err(ParseError::Empty);
    }

    let exponent: i64 = match exp_part {
        None => 0,
        Some(exp) => exp
            .parse()
            .map_err(|_| ParseError::BadExponent(exp.to_string()))?,
    };

    let mut mantissa: BigInt = digits
        .parse()
        .map_err(|_| ParseError::Empty)?;
    if negative {
        mantissa = -mantissa;
    }

    Ok(ScaledInt::new(mantissa, frac_len - exponent))
}
