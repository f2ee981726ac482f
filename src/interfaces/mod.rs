// ============================================================================
// Interfaces Module
// Operand dispatch between real and complex values
// ============================================================================

mod operand;

pub use operand::{Coercible, Number};
