//! Core traits and types for unconstrained smooth minimization.
//!
//! This crate provides the building blocks shared by every minimizer in the
//! `newtonopt` workspace: the objective interface, a bounded evaluation
//! cache, an Armijo backtracking line search, and the Newton-style iteration
//! loop that concrete methods plug their search direction into.
//!
//! # Key Concepts
//!
//! - **Objectives**: functions observed only through their value and gradient
//! - **Direction strategies**: ways of applying an inverse Hessian
//!   approximation to the gradient
//! - **Line search**: geometric backtracking until sufficient decrease
//!
//! # Modules
//!
//! - [`error`]: Error types for vector operations and minimization
//! - [`objective`]: Objective interface, concrete objectives and decorators
//! - [`optimization`]: Line search, direction strategies and the iteration loop
//! - [`types`]: Scalar trait and type aliases
//! - [`vector`]: Checked vector arithmetic

pub mod error;
pub mod objective;
pub mod optimization;
pub mod types;
pub mod vector;

// Re-export commonly used items at the crate root
pub use error::{OptimizerError, OptimizerResult, Result, VectorError};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use newtonopt_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{OptimizerError, OptimizerResult, Result, VectorError};
    pub use crate::objective::{
        CachingGradientFn, CountingGradientFn, FnGradient, GradientFn, QuadraticCost,
    };
    pub use crate::optimization::{
        newton_minimize, BacktrackingLineSearch, DirectionStrategy, Identity,
        InverseHessianMultiply, LineSearchParams, LineSearchResult, Minimizer, NewtonOptions,
        OptimizationResult, SteepestDescent, TerminationReason,
    };
    pub use crate::types::{DMatrix, DVector, Scalar};
}
