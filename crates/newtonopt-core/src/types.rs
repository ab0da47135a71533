//! Type definitions and aliases for unconstrained minimization.
//!
//! This module provides the scalar trait shared by every numeric type in the
//! workspace, and vector/matrix aliases.

use nalgebra::{Dyn, OMatrix, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in optimization (f32 or f64).
///
/// This trait combines all the necessary numeric traits required
/// by the line search, the iteration driver and the direction strategies.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Default relative-improvement tolerance for the iteration driver.
    const DEFAULT_TOLERANCE: Self;

    /// Minimum step length before a line search gives up.
    const MIN_STEP_SIZE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Convert to f64 (for logging and error payloads).
    ///
    /// Returns NaN if the value cannot be represented.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).unwrap_or(f64::NAN)
    }
}

impl Scalar for f32 {
    const DEFAULT_TOLERANCE: Self = 1e-4;
    const MIN_STEP_SIZE: Self = 1e-7;
}

impl Scalar for f64 {
    const DEFAULT_TOLERANCE: Self = 1e-6;
    const MIN_STEP_SIZE: Self = 1e-10;
}

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;
