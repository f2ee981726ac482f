// ============================================================================
// Transcendental Module
// Series-based pi, exp, log, roots and trigonometry
// ============================================================================
//
// Every series runs at the caller's precision widened by the context's guard
// digits, stops once a term falls below 10^-(precision + OVERSHOOT), and is
// truncated back to the caller's configuration.

mod branches;
mod context;
mod functions;
mod series;

pub use branches::{LogBranches, RootBranches};
pub use context::{MathContext, DEFAULT_GUARD_DIGITS, DEFAULT_MAX_ITERATIONS};
pub use functions::distinct_roots;
pub use series::{Factorials, SeriesGuard, OVERSHOOT};
