//! # newtonopt
//!
//! Unconstrained minimization of smooth objectives in Rust.
//!
//! The library minimizes a function known only through its value and
//! gradient. Gradient descent and L-BFGS share one Newton-style loop with an
//! Armijo backtracking line search; an optional bounded cache removes the
//! repeated evaluations the loop and the line search make at the same point.
//!
//! ## Quick Start
//!
//! ```rust
//! use newtonopt::prelude::*;
//!
//! // Elongated bowl: (x - 3)^2 + 10 (y + 1)^2
//! let f = FnGradient::new(2, |p: &DVector<f64>| {
//!     let (dx, dy) = (p[0] - 3.0, p[1] + 1.0);
//!     (dx * dx + 10.0 * dy * dy, DVector::from_vec(vec![2.0 * dx, 20.0 * dy]))
//! });
//! let cached = CachingGradientFn::new(4, f);
//!
//! let lbfgs = LBFGS::new(NewtonOptions::new().with_tolerance(1e-10), 5);
//! let result = lbfgs.minimize(&cached).unwrap();
//!
//! assert!(result.converged);
//! assert!((result.point[0] - 3.0).abs() < 1e-4);
//! assert!((result.point[1] + 1.0).abs() < 1e-4);
//! ```
//!
//! ## Crate Organization
//!
//! - [`newtonopt_core`]: objective interface, cache, line search and iteration loop
//! - [`newtonopt_optim`]: gradient descent and L-BFGS
//! - [`nalgebra`]: the linear algebra backing every point and gradient

pub use nalgebra;
pub use newtonopt_core;
pub use newtonopt_optim;

// Re-export commonly used items at the crate root
pub use newtonopt_core::{OptimizerError, OptimizerResult, VectorError};
pub use newtonopt_optim::{GradientDescent, LBFGS};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use newtonopt_core::prelude::*;
    pub use newtonopt_optim::{GradientDescent, LbfgsHistory, SecantPair, LBFGS};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
