//! Limited-memory BFGS.
//!
//! L-BFGS approximates the inverse Hessian from the `m` most recent secant
//! pairs
//!
//! ```text
//! s_k = x_k - x_{k-1}
//! y_k = grad f(x_k) - grad f(x_{k-1})
//! ```
//!
//! and applies it to the gradient without ever forming a matrix, using the
//! two-loop recursion:
//!
//! ```text
//! q = grad f(x_k)
//! for i = k-1, ..., k-m:
//!     α_i = <s_i, q> / <s_i, y_i>
//!     q = q - α_i y_i
//!
//! q = γ q            // γ = <s, y> / <y, y> of the newest pair, 1 if none
//!
//! for i = k-m, ..., k-1:
//!     β = <y_i, q> / <s_i, y_i>
//!     q = q + (α_i - β) s_i
//!
//! return q           // ≈ H⁻¹ grad f(x_k)
//! ```
//!
//! Every pair must satisfy the curvature condition `<s, y> > 0`; a pair that
//! does not is a fatal error, since the approximation would stop being
//! positive definite. With a history capacity of zero no pair is ever
//! recorded and the method is exactly gradient descent.
//!
//! # References
//!
//! - Nocedal & Wright, "Numerical Optimization" (2006), Algorithm 7.4

use newtonopt_core::{
    error::{OptimizerError, OptimizerResult},
    objective::GradientFn,
    optimization::{
        direction::{DirectionStrategy, InverseHessianMultiply},
        newton::newton_minimize,
        optimizer::{Minimizer, NewtonOptions, OptimizationResult},
    },
    types::{DVector, Scalar},
    vector,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{trace, warn};

/// A secant pair with its curvature `<s, y>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SecantPair<T: Scalar> {
    /// Position difference `x_k - x_{k-1}`
    pub s: DVector<T>,
    /// Gradient difference `grad f(x_k) - grad f(x_{k-1})`
    pub y: DVector<T>,
    /// `<s, y>`, strictly positive
    pub curvature: T,
}

impl<T: Scalar> SecantPair<T> {
    /// Builds a pair, checking the curvature condition.
    ///
    /// # Errors
    ///
    /// `NonPositiveCurvature` if `<s, y> <= 0` (or NaN), `Vector` if the
    /// lengths differ.
    pub fn new(s: DVector<T>, y: DVector<T>) -> OptimizerResult<Self> {
        let curvature = vector::dot(&s, &y)?;
        if !(curvature > T::zero()) {
            warn!(
                curvature = Scalar::to_f64(curvature),
                "secant pair violates the curvature condition"
            );
            return Err(OptimizerError::non_positive_curvature(Scalar::to_f64(curvature)));
        }
        Ok(Self { s, y, curvature })
    }
}

/// Per-call L-BFGS state: the secant window and the previous iterate.
#[derive(Debug, Clone)]
pub struct LbfgsHistory<T: Scalar> {
    pairs: VecDeque<SecantPair<T>>,
    max_history: usize,
    previous: Option<(DVector<T>, DVector<T>)>,
}

impl<T: Scalar> LbfgsHistory<T> {
    /// Creates an empty history holding at most `max_history` pairs.
    pub fn new(max_history: usize) -> Self {
        Self {
            pairs: VecDeque::with_capacity(max_history),
            max_history,
            previous: None,
        }
    }

    /// Stored pairs, oldest first.
    pub fn pairs(&self) -> &VecDeque<SecantPair<T>> {
        &self.pairs
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no pair is stored.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Initial inverse Hessian scaling `<s, y> / <y, y>` of the newest pair.
    pub fn gamma(&self) -> T {
        self.pairs
            .back()
            .map_or(T::one(), |pair| pair.curvature / pair.y.dot(&pair.y))
    }

    fn push(&mut self, pair: SecantPair<T>) {
        if self.pairs.len() == self.max_history {
            self.pairs.pop_front();
        }
        self.pairs.push_back(pair);
    }
}

/// Two-loop recursion over a borrowed secant window.
#[derive(Debug, Clone, Copy)]
pub struct TwoLoopRecursion<'a, T: Scalar> {
    pairs: &'a VecDeque<SecantPair<T>>,
    gamma: T,
}

impl<T: Scalar> InverseHessianMultiply<T> for TwoLoopRecursion<'_, T> {
    fn multiply(&self, gradient: &DVector<T>) -> OptimizerResult<DVector<T>> {
        let mut q = gradient.clone();
        let mut alphas = Vec::with_capacity(self.pairs.len());

        // Newest to oldest
        for pair in self.pairs.iter().rev() {
            let alpha = vector::dot(&pair.s, &q)? / pair.curvature;
            vector::add_in_place(&mut q, &pair.y, -alpha)?;
            alphas.push(alpha);
        }

        vector::scale_in_place(&mut q, self.gamma);

        // Oldest to newest
        for (pair, &alpha) in self.pairs.iter().zip(alphas.iter().rev()) {
            let beta = vector::dot(&pair.y, &q)? / pair.curvature;
            vector::add_in_place(&mut q, &pair.s, alpha - beta)?;
        }

        Ok(q)
    }
}

impl<T: Scalar> DirectionStrategy<T> for LbfgsHistory<T> {
    type Operator<'a> = TwoLoopRecursion<'a, T>;

    fn at_point(
        &mut self,
        point: &DVector<T>,
        gradient: &DVector<T>,
    ) -> OptimizerResult<Self::Operator<'_>> {
        if self.max_history > 0 {
            if let Some((previous_point, previous_gradient)) = &self.previous {
                let s = vector::add(point, previous_point, T::one(), -T::one())?;
                let y = vector::add(gradient, previous_gradient, T::one(), -T::one())?;
                let pair = SecantPair::new(s, y)?;

                trace!(
                    curvature = Scalar::to_f64(pair.curvature),
                    stored = self.pairs.len(),
                    "recording secant pair"
                );
                self.push(pair);
            }
            self.previous = Some((point.clone(), gradient.clone()));
        }

        Ok(TwoLoopRecursion {
            pairs: &self.pairs,
            gamma: self.gamma(),
        })
    }

    fn name(&self) -> &str {
        "L-BFGS"
    }
}

/// L-BFGS minimizer.
///
/// # Examples
///
/// ```rust
/// use newtonopt_core::prelude::*;
/// use newtonopt_optim::LBFGS;
///
/// // (x - 1)^4 + (y + 2)^4
/// let f = FnGradient::new(2, |x: &DVector<f64>| {
///     let (a, b) = (x[0] - 1.0, x[1] + 2.0);
///     (
///         a.powi(4) + b.powi(4),
///         DVector::from_vec(vec![4.0 * a.powi(3), 4.0 * b.powi(3)]),
///     )
/// });
///
/// let lbfgs = LBFGS::new(NewtonOptions::new().with_tolerance(1e-5), 5);
/// let result = lbfgs.minimize(&f).unwrap();
/// assert!(result.value < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LBFGS<T: Scalar> {
    options: NewtonOptions<T>,
    max_history: usize,
}

impl<T: Scalar> LBFGS<T> {
    /// Creates an L-BFGS minimizer keeping at most `max_history` secant pairs.
    pub fn new(options: NewtonOptions<T>, max_history: usize) -> Self {
        Self {
            options,
            max_history,
        }
    }

    /// Returns the iteration options.
    pub fn options(&self) -> &NewtonOptions<T> {
        &self.options
    }

    /// Returns the history capacity.
    pub fn max_history(&self) -> usize {
        self.max_history
    }
}

impl<T: Scalar> Minimizer<T> for LBFGS<T> {
    fn name(&self) -> &str {
        "L-BFGS"
    }

    fn minimize<G>(&self, f: &G) -> OptimizerResult<OptimizationResult<T>>
    where
        G: GradientFn<T> + ?Sized,
    {
        let mut history = LbfgsHistory::new(self.max_history);
        newton_minimize(f, &mut history, &self.options)
    }
}
