// ============================================================================
// Scaled Real Library
// Arbitrary-precision real and complex arithmetic on scaled integers
// ============================================================================

//! # Scaled Real
//!
//! Arbitrary-precision decimal arithmetic built on `(mantissa, offset)`
//! scaled integers, with a complex layer and series-based transcendental
//! functions.
//!
//! ## Features
//!
//! - **Configurable precision** carried by every value and propagated to results
//! - **Truncating arithmetic**: results are cut to the configured digit count
//! - **Complex numbers** sharing the real engine's precision
//! - **Transcendental functions** (π, exp, log, roots, sin, cos, arctan) with
//!   explicit, owned caches instead of global state
//!
//! ## Example
//!
//! ```rust
//! use scaled_real::prelude::*;
//!
//! let cfg = PrecisionConfig::new(50, true).unwrap();
//! let a = Real::new("1.5", cfg).unwrap();
//! let b = Real::new("2.25", cfg).unwrap();
//! assert_eq!((&a + &b).to_string(), "3.75");
//!
//! let ctx = MathContext::new();
//! let pi = ctx.pi(cfg).unwrap();
//! assert!(pi.to_string().starts_with("3.14159265358979"));
//!
//! let z = Complex::new("1+1i", cfg).unwrap();
//! assert_eq!((&z * &z.conj()).to_string(), "2.0 + 0.0i");
//! ```

pub mod cache;
pub mod complex;
pub mod interfaces;
pub mod numeric;
pub mod transcendental;

// Re-exports for convenience
pub mod prelude {
    pub use crate::cache::{ConstantCache, MemoCache, MemoFunction};
    pub use crate::complex::{Complex, ComplexInput};
    pub use crate::interfaces::{Coercible, Number};
    pub use crate::numeric::{
        NumericError, NumericResult, ParseError, PrecisionConfig, Real, RealInput, ScaledInt,
    };
    pub use crate::transcendental::{distinct_roots, LogBranches, MathContext, RootBranches};
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns an error if a global subscriber is already set.
#[cfg(feature = "logging")]
pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}
