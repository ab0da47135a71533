//! Search direction strategies.
//!
//! Newton-type methods compute the search direction as `d = -H⁻¹ g`, where
//! `H⁻¹` is (an approximation of) the inverse Hessian at the current point.
//! The iteration driver is agnostic of how `H⁻¹ g` is obtained: at every
//! iterate it asks a [`DirectionStrategy`] for an operator and applies that
//! operator to the gradient.
//!
//! Strategies may keep state across iterates (L-BFGS keeps its secant
//! pairs), which is why [`DirectionStrategy::at_point`] takes `&mut self`.
//! The returned operator may borrow that state for as long as the driver
//! uses it.

use crate::{
    error::OptimizerResult,
    types::{DVector, Scalar},
};
use std::fmt::Debug;

/// Application of an (approximate) inverse Hessian to a gradient.
pub trait InverseHessianMultiply<T: Scalar> {
    /// Returns `H⁻¹ · gradient`.
    fn multiply(&self, gradient: &DVector<T>) -> OptimizerResult<DVector<T>>;
}

/// Produces an inverse Hessian operator at each iterate.
pub trait DirectionStrategy<T: Scalar>: Debug {
    /// Operator valid for the point it was produced at.
    type Operator<'a>: InverseHessianMultiply<T>
    where
        Self: 'a;

    /// Updates the strategy state with the current iterate and returns the
    /// operator to apply to `gradient`.
    ///
    /// # Errors
    ///
    /// Strategy specific. L-BFGS fails on a secant pair with non-positive
    /// curvature.
    fn at_point(
        &mut self,
        point: &DVector<T>,
        gradient: &DVector<T>,
    ) -> OptimizerResult<Self::Operator<'_>>;

    /// Name of the strategy.
    fn name(&self) -> &str;
}

/// The identity operator: `H⁻¹ g = g`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<T: Scalar> InverseHessianMultiply<T> for Identity {
    fn multiply(&self, gradient: &DVector<T>) -> OptimizerResult<DVector<T>> {
        Ok(gradient.clone())
    }
}

/// Stateless strategy returning [`Identity`] everywhere, which turns the
/// Newton iteration into steepest descent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteepestDescent;

impl<T: Scalar> DirectionStrategy<T> for SteepestDescent {
    type Operator<'a> = Identity;

    fn at_point(
        &mut self,
        _point: &DVector<T>,
        _gradient: &DVector<T>,
    ) -> OptimizerResult<Self::Operator<'_>> {
        Ok(Identity)
    }

    fn name(&self) -> &str {
        "Steepest Descent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_operator() {
        let g = DVector::from_vec(vec![1.0, -2.0, 3.5]);
        assert_eq!(Identity.multiply(&g).unwrap(), g);
    }

    #[test]
    fn test_steepest_descent_strategy() {
        let mut strategy = SteepestDescent;
        let x = DVector::from_vec(vec![0.0, 0.0]);
        let g = DVector::from_vec(vec![4.0, -1.0]);

        let op = DirectionStrategy::<f64>::at_point(&mut strategy, &x, &g).unwrap();
        assert_eq!(op.multiply(&g).unwrap(), g);
        assert_eq!(DirectionStrategy::<f64>::name(&strategy), "Steepest Descent");
    }
}
