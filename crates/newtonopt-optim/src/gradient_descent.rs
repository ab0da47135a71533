//! Gradient descent.
//!
//! The Newton-style loop with the identity as inverse Hessian: every step
//! moves along the negative gradient, with the step length chosen by
//! backtracking.
//!
//! # Examples
//!
//! ```rust
//! use newtonopt_core::prelude::*;
//! use newtonopt_optim::GradientDescent;
//!
//! let f = QuadraticCost::<f64>::simple(2);
//! let gd = GradientDescent::new(
//!     NewtonOptions::new().with_initial_guess(DVector::from_vec(vec![1.0, -3.0])),
//! );
//!
//! let result = gd.minimize(&f).unwrap();
//! assert!(result.converged);
//! assert!(result.value < 1e-6);
//! ```

use newtonopt_core::{
    error::OptimizerResult,
    objective::GradientFn,
    optimization::{
        direction::SteepestDescent,
        newton::newton_minimize,
        optimizer::{Minimizer, NewtonOptions, OptimizationResult},
    },
    types::Scalar,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gradient descent minimizer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GradientDescent<T: Scalar> {
    options: NewtonOptions<T>,
}

impl<T: Scalar> GradientDescent<T> {
    /// Creates a gradient descent minimizer with the given options.
    pub fn new(options: NewtonOptions<T>) -> Self {
        Self { options }
    }

    /// Returns the iteration options.
    pub fn options(&self) -> &NewtonOptions<T> {
        &self.options
    }
}

impl<T: Scalar> Default for GradientDescent<T> {
    fn default() -> Self {
        Self::new(NewtonOptions::default())
    }
}

impl<T: Scalar> Minimizer<T> for GradientDescent<T> {
    fn name(&self) -> &str {
        "Gradient Descent"
    }

    fn minimize<G>(&self, f: &G) -> OptimizerResult<OptimizationResult<T>>
    where
        G: GradientFn<T> + ?Sized,
    {
        newton_minimize(f, &mut SteepestDescent, &self.options)
    }
}
