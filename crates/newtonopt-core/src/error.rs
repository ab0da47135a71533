//! Error types for vector arithmetic and minimization.
//!
//! This module defines the two error layers used throughout the library:
//! [`VectorError`] for the elementary vector operations and
//! [`OptimizerError`] for everything the line search and the iteration
//! driver can fail on. Every variant is fatal for the current `minimize`
//! call; nothing is retried internally.

use thiserror::Error;

/// Errors that can occur during vector operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    /// Dimension mismatch between vectors.
    ///
    /// This error occurs when operations involve vectors with incompatible lengths.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },
}

impl VectorError {
    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}

/// Errors that can occur during optimization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizerError {
    /// Line search failed to find an acceptable step.
    ///
    /// The step length fell below the configured minimum without satisfying
    /// the sufficient decrease condition. Either the direction is not a
    /// descent direction or the objective is pathological at this point.
    #[error("Line search failed: {reason}")]
    LineSearchFailed {
        /// Description of why the line search failed
        reason: String,
        /// Number of trial steps attempted
        iterations: usize,
        /// Last step size tried
        last_step_size: f64,
        /// Function value at the starting point
        initial_value: f64,
    },

    /// An accepted step increased the objective.
    #[error("Step did not decrease the objective: {previous} -> {current}")]
    NonDescentStep {
        /// Objective value before the step
        previous: f64,
        /// Objective value after the step
        current: f64,
    },

    /// A secant pair violated the curvature condition `s·y > 0`.
    ///
    /// The inverse Hessian approximation can no longer be kept positive
    /// definite.
    #[error("Non-positive curvature in secant pair: s·y = {curvature}")]
    NonPositiveCurvature {
        /// The offending value of `s·y`
        curvature: f64,
    },

    /// Invalid optimizer configuration.
    ///
    /// This error occurs when the optimizer is configured with invalid
    /// parameters (e.g., a backtracking factor outside (0, 1)).
    #[error("Invalid optimizer configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// Propagated vector error.
    #[error("Vector operation failed: {0}")]
    Vector(#[from] VectorError),
}

impl OptimizerError {
    /// Create a LineSearchFailed error with detailed context.
    pub fn line_search_failed<S: Into<String>>(
        reason: S,
        iterations: usize,
        last_step_size: f64,
        initial_value: f64,
    ) -> Self {
        Self::LineSearchFailed {
            reason: reason.into(),
            iterations,
            last_step_size,
            initial_value,
        }
    }

    /// Create a NonDescentStep error.
    pub fn non_descent_step(previous: f64, current: f64) -> Self {
        Self::NonDescentStep { previous, current }
    }

    /// Create a NonPositiveCurvature error.
    pub fn non_positive_curvature(curvature: f64) -> Self {
        Self::NonPositiveCurvature { curvature }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    /// Create a dimension mismatch error wrapped in the optimizer layer.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::Vector(VectorError::dimension_mismatch(expected, actual))
    }
}

/// Result type alias for vector operations.
pub type Result<T> = std::result::Result<T, VectorError>;

/// Result type alias for optimizer operations.
pub type OptimizerResult<T> = std::result::Result<T, OptimizerError>;
