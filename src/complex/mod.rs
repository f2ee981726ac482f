// ============================================================================
// Complex Module
// Complex arithmetic layered on the real engine
// ============================================================================

#[allow(clippy::module_inception)]
mod complex;
mod parse;

pub use complex::{Complex, ComplexInput};
pub use parse::parse_complex;
