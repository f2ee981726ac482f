// ============================================================================
// Numeric Errors
// Error types for scaled-integer arithmetic and the functions built on it
// ============================================================================

use std::error::Error;
use std::fmt;

/// Reasons a decimal or complex literal could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// Input was empty (or only whitespace / a sign)
    Empty,
    /// A character that cannot appear at this position
    UnexpectedChar { ch: char, position: usize },
    /// More than one decimal point
    MultiplePoints,
    /// The `e` suffix was not followed by a valid integer
    BadExponent(String),
    /// Complex literal could not be split into real and imaginary parts
    BadComplex(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty numeric literal"),
            ParseError::UnexpectedChar { ch, position } => {
                write!(f, "unexpected character '{}' at position {}", ch, position)
            },
            ParseError::MultiplePoints => write!(f, "more than one decimal point"),
            ParseError::BadExponent(exp) => write!(f, "invalid exponent '{}'", exp),
            ParseError::BadComplex(text) => write!(f, "malformed complex literal '{}'", text),
        }
    }
}

impl Error for ParseError {}

/// Errors raised by the real engine, the complex layer and the series library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    /// Text could not be parsed as a number
    Parse(ParseError),
    /// A value could not be interpreted as a number of the expected kind.
    /// `kind` names the input variant, `value` its text form.
    Coercion {
        kind: &'static str,
        value: String,
        source: Box<NumericError>,
    },
    /// Argument outside the domain of the operation
    Domain(String),
    /// Non-integer exponent or branch index where only integers are valid
    InvalidExponent(String),
    /// Attempted division by zero
    DivisionByZero,
    /// A series hit the iteration cap before its terms became small enough
    NotConverged {
        series: &'static str,
        iterations: usize,
    },
}

impl NumericError {
    pub fn domain(msg: impl Into<String>) -> Self {
        NumericError::Domain(msg.into())
    }

    pub fn invalid_exponent(msg: impl Into<String>) -> Self {
        NumericError::InvalidExponent(msg.into())
    }

    /// Wrap a construction failure with the offending value and its kind.
    pub fn coercion(kind: &'static str, value: impl Into<String>, source: NumericError) -> Self {
        NumericError::Coercion {
            kind,
            value: value.into(),
            source: Box::new(source),
        }
    }

    /// True for any error raised while interpreting an input value.
    pub fn is_coercion(&self) -> bool {
        matches!(self, NumericError::Coercion { .. } | NumericError::Parse(_))
    }
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Parse(err) => write!(f, "parse error: {}", err),
            NumericError::Coercion { kind, value, source } => write!(
                f,
                "cannot coerce {} value '{}' into a number: {}",
                kind, value, source
            ),
            NumericError::Domain(msg) => write!(f, "domain error: {}", msg),
            NumericError::InvalidExponent(msg) => write!(f, "invalid exponent: {}", msg),
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::NotConverged { series, iterations } => write!(
                f,
                "{} series did not converge within {} iterations",
                series, iterations
            ),
        }
    }
}

impl Error for NumericError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NumericError::Parse(err) => Some(err),
            NumericError::Coercion { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<ParseError> for NumericError {
    fn from(err: ParseError) -> Self {
        NumericError::Parse(err)
    }
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumericError::domain("log of zero").to_string(),
            "domain error: log of zero"
        );
        assert_eq!(
            NumericError::NotConverged {
                series: "arctan",
                iterations: 10
            }
            .to_string(),
            "arctan series did not converge within 10 iterations"
        );
    }

    #[test]
    fn test_coercion_preserves_cause() {
        let err = NumericError::coercion(
            "text",
            "1.2.3",
            NumericError::Parse(ParseError::MultiplePoints),
        );
        assert!(err.is_coercion());
        assert!(err.to_string().contains("'1.2.3'"));

        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "parse error: more than one decimal point");
        assert!(source.source().is_some());
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::DivisionByZero, NumericError::DivisionByZero);
        assert_ne!(
            NumericError::domain("a"),
            NumericError::invalid_exponent("a")
        );
    }
}
