//! newtonopt-optim - Concrete minimizers for unconstrained smooth objectives.
//!
//! Both minimizers run the same Newton-style loop from `newtonopt-core` and
//! differ only in how they turn the gradient into a search direction.
//!
//! # Available Minimizers
//!
//! - **Gradient Descent**: steps along the negative gradient
//! - **L-BFGS**: limited-memory quasi-Newton direction from recent secant pairs
//!
//! # Examples
//!
//! ```rust
//! use newtonopt_core::prelude::*;
//! use newtonopt_optim::{GradientDescent, LBFGS};
//!
//! let f = QuadraticCost::<f64>::simple(4);
//! let options = NewtonOptions::new()
//!     .with_initial_guess(DVector::from_element(4, 2.0))
//!     .with_max_iterations(100);
//!
//! let gd = GradientDescent::new(options.clone()).minimize(&f).unwrap();
//! let lbfgs = LBFGS::new(options, 5).minimize(&f).unwrap();
//! assert!(gd.converged && lbfgs.converged);
//! ```

pub mod gradient_descent;
pub mod lbfgs;

// Re-export main minimizers for convenience
pub use gradient_descent::GradientDescent;
pub use lbfgs::{LbfgsHistory, SecantPair, TwoLoopRecursion, LBFGS};

// Re-export commonly used items from core
pub use newtonopt_core::optimization::{
    Minimizer, NewtonOptions, OptimizationResult, TerminationReason,
};
