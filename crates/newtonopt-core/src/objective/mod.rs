//! Objectives and objective decorators.

pub mod cached_gradient_fn;
pub mod gradient_fn;

// Re-export objective types
pub use cached_gradient_fn::*;
pub use gradient_fn::*;
