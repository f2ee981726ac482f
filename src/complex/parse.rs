// ============================================================================
// Complex Literal Parsing
// Splits "a+bi" style text into real and imaginary decimal parts
// ============================================================================

use crate::numeric::{parse_decimal, ParseError, ScaledInt};

/// Parse complex text into `(real, imaginary)` scaled integers.
///
/// Accepted forms (spaces ignored):
/// - "a+bi", "a-bi"
/// - "bi", "-bi"
/// - "a"
/// - "i", "-i", "a+i", "a-i"
///
/// A sign directly after an exponent marker (`1e-5+2i`) is part of the
/// number, not a split point.
pub fn parse_complex(text: &str) -> Result<(ScaledInt, ScaledInt), ParseError> {
    let s: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    let Some(body) = s.strip_suffix('i') else {
        return Ok((parse_decimal(&s)?, ScaledInt::zero()));
    };
    if body.contains('i') {
        return Err(ParseError::BadComplex(text.to_string()));
    }

    let (re_text, im_text) = match split_point(body) {
        Some(idx) => body.split_at(idx),
        None => ("", body),
    };

    let re = if re_text.is_empty() {
        ScaledInt::zero()
    } else {
        parse_decimal(re_text)?
    };
    let im = match im_text {
        "" | "+" => ScaledInt::from_integer(1),
        "-" => ScaledInt::from_integer(-1),
        other => parse_decimal(other)?,
    };
    Ok((re, im))
}

/// Index of the sign that starts the imaginary part, if any.
fn split_point(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    (1..bytes.len()).rev().find(|&idx| {
        matches!(bytes[idx], b'+' | b'-') && !matches!(bytes[idx - 1], b'e' | b'E')
    })
}
