// ============================================================================
// Cache Module
// Explicitly owned caches for constants and memoized function results
// ============================================================================

mod constants;
mod memo;

pub use constants::ConstantCache;
pub use memo::{MemoCache, MemoFunction};
