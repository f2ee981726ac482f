// ============================================================================
// Scaled-Integer Value
// A (mantissa, offset) pair meaning mantissa × 10^-offset
// ============================================================================

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use std::cmp::Ordering;

/// Compute 10^n as a big integer
#[inline]
pub(crate) fn pow10(n: u64) -> BigInt {
    let exp = u32::try_from(n).unwrap_or(u32::MAX);
    BigInt::from(10u32).pow(exp)
}

/// Number of decimal digits in the magnitude of `n` (zero has one digit).
#[inline]
pub(crate) fn digit_len(n: &BigInt) -> u64 {
    n.magnitude().to_str_radix(10).len() as u64
}

/// Raw scaled integer: `mantissa × 10^-offset`.
///
/// Representations are canonical only up to trimming: `(15, 1)` and
/// `(150, 2)` both mean 1.5. Comparison always realigns first.
///
/// The offset is signed. Trimming a large integer may push it below zero,
/// in which case the value is `mantissa × 10^|offset|`.
#[derive(Clone, Debug)]
pub struct ScaledInt {
    mantissa: BigInt,
    offset: i64,
}

impl ScaledInt {
    #[inline]
    pub fn new(mantissa: BigInt, offset: i64) -> Self {
        Self { mantissa, offset }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    #[inline]
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self::new(value.into(), 0)
    }

    #[inline]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        self.offset
    }

    #[inline]
    pub fn into_parts(self) -> (BigInt, i64) {
        (self.mantissa, self.offset)
    }

    #[inline]
    pub fn digit_len(&self) -> u64 {
        digit_len(&self.mantissa)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.mantissa.is_positive()
    }

    /// -1, 0 or 1
    pub fn signum(&self) -> i32 {
        if self.mantissa.is_positive() {
            1
        } else if self.mantissa.is_negative() {
            -1
        } else {
            0
        }
    }

    /// Mantissa expressed at a larger (or equal) offset.
    fn rescaled(&self, offset: i64) -> BigInt {
        debug_assert!(offset >= self.offset);
        let shift = (offset - self.offset) as u64;
        if shift == 0 {
            self.mantissa.clone()
        } else {
            &self.mantissa * pow10(shift)
        }
    }

    /// Bring both values to the larger of the two offsets.
    ///
    /// Returns `(self_mantissa, other_mantissa, shared_offset)`.
    pub fn align(&self, other: &Self) -> (BigInt, BigInt, i64) {
        let offset = self.offset.max(other.offset);
        (self.rescaled(offset), other.rescaled(offset), offset)
    }

    pub fn add(&self, other: &Self) -> Self {
        let (a, b, offset) = self.align(other);
        Self::new(a + b, offset)
    }

    pub fn sub(&self, other: &Self) -> Self {
        let (a, b, offset) = self.align(other);
        Self::new(a - b, offset)
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self::new(&self.mantissa * &other.mantissa, self.offset + other.offset)
    }

    pub fn neg(&self) -> Self {
        Self::new(-&self.mantissa, self.offset)
    }

    pub fn abs(&self) -> Self {
        Self::new(self.mantissa.abs(), self.offset)
    }

    /// Truncate the mantissa to `precision` leading digits, keeping the
    /// magnitude by lowering the offset. Returns the number of digits removed.
    pub fn trim(&mut self, precision: u32) -> u64 {
        let len = self.digit_len();
        let precision = u64::from(precision);
        if len <= precision {
            return 0;
        }
        let removed = len - precision;
        // BigInt division truncates toward zero, which keeps the sign intact
        self.mantissa = &self.mantissa / pow10(removed);
        self.offset -= removed as i64;
        removed
    }

    /// Non-mutating variant of [`ScaledInt::trim`].
    pub fn trimmed(&self, precision: u32) -> Self {
        let mut copy = self.clone();
        copy.trim(precision);
        copy
    }

    /// True when the value has no fractional digits.
    pub fn is_integer(&self) -> bool {
        if self.offset <= 0 || self.mantissa.is_zero() {
            return true;
        }
        self.mantissa.is_multiple_of(&pow10(self.offset as u64))
    }

    /// The exact integer value, if there is one.
    pub fn to_integer(&self) -> Option<BigInt> {
        if self.offset <= 0 {
            return Some(&self.mantissa * pow10(self.offset.unsigned_abs()));
        }
        let (q, r) = self.mantissa.div_rem(&pow10(self.offset as u64));
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    /// The integer part, truncated toward zero.
    pub fn truncated(&self) -> BigInt {
        if self.offset <= 0 {
            &self.mantissa * pow10(self.offset.unsigned_abs())
        } else {
            &self.mantissa / pow10(self.offset as u64)
        }
    }

    /// Shift-equivalent representation with trailing zeros removed.
    /// Zero normalizes to `(0, 0)`.
    pub fn normalized(&self) -> Self {
        if self.mantissa.is_zero() {
            return Self::zero();
        }
        let ten = BigInt::from(10u32);
        let mut mantissa = self.mantissa.clone();
        let mut offset = self.offset;
        loop {
            let (q, r) = mantissa.div_rem(&ten);
            if !r.is_zero() {
                break;
            }
            mantissa = q;
            offset -= 1;
        }
        Self::new(mantissa, offset)
    }

    /// Value comparison (realigns, so representation does not matter).
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.align(other);
        a.cmp(&b)
    }
}

impl PartialEq for ScaledInt {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_value(other) == Ordering::Equal
    }
}

impl Eq for ScaledInt {}

#[cfg(test)]
mod tests {
    use super::*;

    fn si(m: i64, o: i64) -> ScaledInt {
        ScaledInt::new(BigInt::from(m), o)
    }

    #[test]
    fn test_align() {
        let (a, b, off) = si(15, 1).align(&si(225, 2));
        assert_eq!(a, BigInt::from(150));
        assert_eq!(b, BigInt::from(225));
        assert_eq!(off, 2);
    }

    #[test]
    fn test_add_sub_mul() {
        assert_eq!(si(15, 1).add(&si(225, 2)), si(375, 2));
        assert_eq!(si(15, 1).sub(&si(225, 2)), si(-75, 2));
        assert_eq!(si(15, 1).mul(&si(15, 1)), si(225, 2));
    }

    #[test]
    fn test_shift_equivalent_equality() {
        assert_eq!(si(15, 1), si(150000, 5));
        assert_eq!(si(0, 0), si(0, 7));
        assert_ne!(si(15, 1), si(15, 2));
    }

    #[test]
    fn test_trim() {
        let mut x = si(123456, 3);
        assert_eq!(x.trim(4), 2);
        assert_eq!(x.mantissa(), &BigInt::from(1234));
        assert_eq!(x.offset(), 1);

        // Sign survives truncation
        let mut y = si(-987654, 6);
        y.trim(3);
        assert_eq!(y.mantissa(), &BigInt::from(-987));
        assert_eq!(y.offset(), 3);

        // Short mantissas are untouched
        let mut z = si(12, 5);
        assert_eq!(z.trim(4), 0);
        assert_eq!(z, si(12, 5));
    }

    #[test]
    fn test_trim_large_integer_goes_negative_offset() {
        let x = si(123456, 0).trimmed(3);
        assert_eq!(x.mantissa(), &BigInt::from(123));
        assert_eq!(x.offset(), -3);
        assert_eq!(x, si(123000, 0));
    }

    #[test]
    fn test_is_integer() {
        assert!(si(300, 2).is_integer());
        assert!(!si(301, 2).is_integer());
        assert!(si(7, -2).is_integer());
        assert_eq!(si(300, 2).to_integer(), Some(BigInt::from(3)));
        assert_eq!(si(7, -2).to_integer(), Some(BigInt::from(700)));
        assert_eq!(si(301, 2).to_integer(), None);
    }

    #[test]
    fn test_truncated() {
        assert_eq!(si(-375, 2).truncated(), BigInt::from(-3));
        assert_eq!(si(5, -1).truncated(), BigInt::from(50));
    }

    #[test]
    fn test_normalized() {
        let n = si(1500, 3).normalized();
        assert_eq!(n.mantissa(), &BigInt::from(15));
        assert_eq!(n.offset(), 1);
        let z = si(0, 9).normalized();
        assert_eq!(z.offset(), 0);
    }

    #[test]
    fn test_digit_len() {
        assert_eq!(si(0, 0).digit_len(), 1);
        assert_eq!(si(-12345, 0).digit_len(), 5);
    }
}
