// ============================================================================
// Precision Configuration
// Immutable precision settings carried by every real and complex value
// ============================================================================

use super::errors::{NumericError, NumericResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Precision used when nothing else is specified.
pub const DEFAULT_PRECISION: u32 = 100;

/// Name of the external configuration value consulted by [`PrecisionConfig::from_env`].
pub const PRECISION_ENV_VAR: &str = "IBR_DEF_PREC";

/// Precision settings shared by a value and everything derived from it.
///
/// - `precision`: maximum number of mantissa digits kept after trimming
/// - `trim`: whether results are trimmed automatically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "PrecisionConfigRepr")
)]
pub struct PrecisionConfig {
    precision: u32,
    trim: bool,
}

/// Unchecked wire form; deserialization goes through [`PrecisionConfig::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PrecisionConfigRepr {
    precision: u32,
    trim: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<PrecisionConfigRepr> for PrecisionConfig {
    type Error = NumericError;

    fn try_from(repr: PrecisionConfigRepr) -> NumericResult<Self> {
        PrecisionConfig::new(repr.precision, repr.trim)
    }
}

impl PrecisionConfig {
    /// Create a configuration.
    ///
    /// # Errors
    /// Returns `Domain` if `precision` is zero.
    pub fn new(precision: u32, trim: bool) -> NumericResult<Self> {
        if precision == 0 {
            return Err(NumericError::domain("precision must be a positive integer"));
        }
        Ok(Self { precision, trim })
    }

    /// Resolve the default precision from a named lookup.
    ///
    /// Missing values fall back to [`DEFAULT_PRECISION`]; unparsable or zero
    /// values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let precision = match lookup(PRECISION_ENV_VAR) {
            None => DEFAULT_PRECISION,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(p) if p > 0 => p,
                _ => {
                    tracing::warn!(
                        "ignoring {}={:?}: expected a positive integer",
                        PRECISION_ENV_VAR,
                        raw
                    );
                    DEFAULT_PRECISION
                },
            },
        };
        Self {
            precision,
            trim: true,
        }
    }

    /// Resolve the default precision from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[inline]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    #[inline]
    pub const fn trim_enabled(&self) -> bool {
        self.trim
    }

    /// Builder method: replace the precision
    pub fn with_precision(self, precision: u32) -> NumericResult<Self> {
        Self::new(precision, self.trim)
    }

    /// Builder method: enable or disable trimming
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Same configuration with `guard` extra digits of precision.
    pub fn widened(self, guard: u32) -> Self {
        Self {
            precision: self.precision.saturating_add(guard),
            trim: self.trim,
        }
    }
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            trim: true,
        }
    }
}
