// ============================================================================
// Numeric Module
// Scaled-integer real arithmetic with configurable precision
// ============================================================================
//
// This module provides:
// - ScaledInt: (mantissa, offset) pair with alignment and trimming
// - Real: arbitrary-precision real number carrying a PrecisionConfig
// - RealInput: tagged union of accepted construction inputs
// - NumericError: error taxonomy shared by the whole crate
//
// Design principles:
// - No floating-point operations (explicit lossy conversion only)
// - Results truncate, never round
// - Fallible operations return Result

mod config;
mod errors;
mod input;
mod real;
mod scaled;

pub use config::{PrecisionConfig, DEFAULT_PRECISION, PRECISION_ENV_VAR};
pub use errors::{NumericError, NumericResult, ParseError};
pub use input::{parse_decimal, RealInput};
pub use real::Real;
pub use scaled::ScaledInt;

pub(crate) use real::format_scaled;
