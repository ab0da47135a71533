//! Minimizer interface, iteration options and results.
//!
//! Every minimizer in the workspace is an instance of the same Newton-style
//! loop (see [`newton`](super::newton)): starting from an initial guess,
//!
//! 1. evaluate the objective and its gradient at `xₖ`,
//! 2. ask the direction strategy for `dₖ = -H⁻¹ grad f(xₖ)`,
//! 3. backtrack along `dₖ` to a step `tₖ` with sufficient decrease,
//! 4. move to `xₖ₊₁ = xₖ + tₖ dₖ`,
//! 5. stop once the relative improvement `|f(xₖ) - f(xₖ₊₁)| / |f(xₖ₊₁)|`
//!    or the squared gradient norm at `xₖ₊₁` is within the tolerance.
//!
//! [`NewtonOptions`] carries everything the loop needs besides the objective
//! and the strategy. [`OptimizationResult`] reports where it stopped and why.
//!
//! # Example
//!
//! ```rust
//! use newtonopt_core::optimization::optimizer::NewtonOptions;
//! use nalgebra::DVector;
//!
//! let options = NewtonOptions::new()
//!     .with_initial_guess(DVector::from_vec(vec![1.0, -1.0]))
//!     .with_max_iterations(200)
//!     .with_tolerance(1e-8);
//! assert!(options.validate().is_ok());
//! ```

use crate::{
    error::{OptimizerError, OptimizerResult},
    objective::GradientFn,
    optimization::line_search::LineSearchParams,
    types::{DVector, Scalar},
};
use std::fmt::Debug;
use std::time::Duration;

/// Options of the Newton-style iteration loop.
///
/// Supplied once per `minimize` call. A `max_iterations` of `None` or
/// `Some(0)` means the loop only stops on convergence or on an error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewtonOptions<T>
where
    T: Scalar,
{
    /// Starting point; the zero vector of the objective's dimension if `None`
    pub initial_guess: Option<DVector<T>>,

    /// Iteration cap
    pub max_iterations: Option<usize>,

    /// Threshold for both the relative improvement and the squared gradient norm
    pub tolerance: T,

    /// Backtracking factor of the line search on the first iteration
    pub initial_backtrack: T,

    /// Backtracking factor of the line search on every later iteration
    pub backtrack: T,

    /// Armijo coefficient of the line search
    pub sufficient_decrease: T,

    /// Minimum step size of the line search
    pub min_step_size: T,
}

impl<T> Default for NewtonOptions<T>
where
    T: Scalar,
{
    fn default() -> Self {
        let line_search = LineSearchParams::<T>::default();
        Self {
            initial_guess: None,
            max_iterations: None,
            tolerance: T::DEFAULT_TOLERANCE,
            initial_backtrack: line_search.rho,
            backtrack: line_search.rho,
            sufficient_decrease: line_search.c1,
            min_step_size: line_search.min_step_size,
        }
    }
}

impl<T> NewtonOptions<T>
where
    T: Scalar,
{
    /// Creates options with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting point.
    pub fn with_initial_guess(mut self, initial_guess: DVector<T>) -> Self {
        self.initial_guess = Some(initial_guess);
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Sets the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the backtracking factor used on the first iteration.
    pub fn with_initial_backtrack(mut self, factor: T) -> Self {
        self.initial_backtrack = factor;
        self
    }

    /// Sets the backtracking factor used after the first iteration.
    pub fn with_backtrack(mut self, factor: T) -> Self {
        self.backtrack = factor;
        self
    }

    /// Sets the Armijo coefficient.
    pub fn with_sufficient_decrease(mut self, c1: T) -> Self {
        self.sufficient_decrease = c1;
        self
    }

    /// Sets the minimum line search step.
    pub fn with_min_step_size(mut self, min_step_size: T) -> Self {
        self.min_step_size = min_step_size;
        self
    }

    /// The effective iteration cap, `None` when unbounded.
    pub fn iteration_cap(&self) -> Option<usize> {
        self.max_iterations.filter(|&n| n > 0)
    }

    /// Line search parameters for the given iteration (0-based).
    pub fn line_search_params(&self, iteration: usize) -> LineSearchParams<T> {
        let rho = if iteration == 0 {
            self.initial_backtrack
        } else {
            self.backtrack
        };
        LineSearchParams {
            rho,
            c1: self.sufficient_decrease,
            min_step_size: self.min_step_size,
        }
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns `OptimizerError::InvalidConfiguration` for a negative or NaN
    /// tolerance and for line search parameters that do not validate, with
    /// the offending option named.
    pub fn validate(&self) -> OptimizerResult<()> {
        if !(self.tolerance >= T::zero()) {
            return Err(OptimizerError::invalid_configuration(
                "Tolerance must be non-negative",
                "tolerance",
                self.tolerance.to_string(),
            ));
        }

        self.line_search_params(0)
            .validate()
            .map_err(|err| rename_parameter(err, "initial_backtrack"))?;
        self.line_search_params(1)
            .validate()
            .map_err(|err| rename_parameter(err, "backtrack"))?;

        Ok(())
    }
}

/// Maps line search parameter names onto option names.
fn rename_parameter(err: OptimizerError, rho_name: &str) -> OptimizerError {
    match err {
        OptimizerError::InvalidConfiguration {
            reason,
            parameter,
            value,
        } => {
            let parameter = match parameter.as_str() {
                "rho" => rho_name.to_string(),
                "c1" => "sufficient_decrease".to_string(),
                _ => parameter,
            };
            OptimizerError::InvalidConfiguration {
                reason,
                parameter,
                value,
            }
        }
        other => other,
    }
}

/// Reasons for the iteration loop to stop without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// Relative improvement or squared gradient norm within the tolerance
    Converged,
    /// Iteration cap exhausted without convergence
    MaxIterations,
}

/// Result of a minimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult<T>
where
    T: Scalar,
{
    /// The final iterate
    pub point: DVector<T>,

    /// The objective value at the final iterate
    pub value: T,

    /// Squared gradient norm at the final iterate
    pub gradient_norm: T,

    /// Number of completed iterations
    pub iterations: usize,

    /// Objective evaluations requested by the loop and its line searches
    pub function_evaluations: usize,

    /// Wall-clock time elapsed during optimization
    pub duration: Duration,

    /// Why the loop stopped
    pub termination_reason: TerminationReason,

    /// True if the loop stopped on the tolerance
    pub converged: bool,
}

impl<T> OptimizationResult<T>
where
    T: Scalar,
{
    /// Creates a new optimization result.
    pub fn new(
        point: DVector<T>,
        value: T,
        iterations: usize,
        duration: Duration,
        termination_reason: TerminationReason,
    ) -> Self {
        Self {
            point,
            value,
            gradient_norm: T::zero(),
            iterations,
            function_evaluations: 0,
            duration,
            termination_reason,
            converged: termination_reason == TerminationReason::Converged,
        }
    }

    /// Sets the squared gradient norm at the final point.
    pub fn with_gradient_norm(mut self, norm: T) -> Self {
        self.gradient_norm = norm;
        self
    }

    /// Sets the function evaluation count.
    pub fn with_function_evaluations(mut self, count: usize) -> Self {
        self.function_evaluations = count;
        self
    }
}

/// Interface shared by all minimizers.
///
/// A minimizer is configured once and can be reused: each call to
/// [`minimize`](Self::minimize) builds fresh strategy state and discards it
/// on return.
pub trait Minimizer<T>: Debug
where
    T: Scalar,
{
    /// Returns a human-readable name identifying the algorithm.
    fn name(&self) -> &str;

    /// Minimizes `f`.
    ///
    /// # Errors
    ///
    /// Every error is fatal for the call: invalid options, dimension
    /// mismatches, line search failures, non-descent steps and
    /// strategy-specific numerical failures.
    fn minimize<G>(&self, f: &G) -> OptimizerResult<OptimizationResult<T>>
    where
        G: GradientFn<T> + ?Sized;
}
