//! Objective interface for optimization algorithms.
//!
//! An objective is only ever observed through [`GradientFn::eval_at`], which
//! returns the value and the gradient together, and [`GradientFn::dimension`].
//! Objectives must be consistent: evaluating the same point twice has to
//! produce the same pair, which is what makes [`CachingGradientFn`] sound.
//!
//! [`CachingGradientFn`]: super::cached_gradient_fn::CachingGradientFn

use crate::types::{DMatrix, DVector, Scalar};
use std::cell::Cell;
use std::fmt::{self, Debug};

/// Trait for smooth objectives with an analytical gradient.
///
/// This is the main trait that the line search and the minimizers use to
/// evaluate the objective function and its derivative.
pub trait GradientFn<T: Scalar>: Debug {
    /// Evaluates the objective and its gradient at a point.
    ///
    /// # Arguments
    ///
    /// * `point` - A point of length [`dimension`](Self::dimension)
    ///
    /// # Returns
    ///
    /// A tuple of (value, gradient).
    fn eval_at(&self, point: &DVector<T>) -> (T, DVector<T>);

    /// Number of variables the objective takes. Fixed for the object's lifetime.
    fn dimension(&self) -> usize;
}

impl<T, G> GradientFn<T> for &G
where
    T: Scalar,
    G: GradientFn<T> + ?Sized,
{
    fn eval_at(&self, point: &DVector<T>) -> (T, DVector<T>) {
        (**self).eval_at(point)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }
}

/// Objective built from a dimension and a closure.
///
/// # Example
///
/// ```rust
/// use newtonopt_core::objective::{FnGradient, GradientFn};
/// use nalgebra::DVector;
///
/// let x_squared = FnGradient::new(1, |x: &DVector<f64>| {
///     (x[0] * x[0], DVector::from_element(1, 2.0 * x[0]))
/// });
///
/// let (value, gradient) = x_squared.eval_at(&DVector::from_element(1, 3.0));
/// assert_eq!(value, 9.0);
/// assert_eq!(gradient[0], 6.0);
/// ```
pub struct FnGradient<T, F>
where
    T: Scalar,
    F: Fn(&DVector<T>) -> (T, DVector<T>),
{
    f: F,
    dim: usize,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, F> FnGradient<T, F>
where
    T: Scalar,
    F: Fn(&DVector<T>) -> (T, DVector<T>),
{
    /// Wraps `f` as an objective over `dim` variables.
    pub fn new(dim: usize, f: F) -> Self {
        Self {
            f,
            dim,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T, F> Debug for FnGradient<T, F>
where
    T: Scalar,
    F: Fn(&DVector<T>) -> (T, DVector<T>),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGradient").field("dim", &self.dim).finish()
    }
}

impl<T, F> GradientFn<T> for FnGradient<T, F>
where
    T: Scalar,
    F: Fn(&DVector<T>) -> (T, DVector<T>),
{
    fn eval_at(&self, point: &DVector<T>) -> (T, DVector<T>) {
        (self.f)(point)
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}

/// A quadratic objective.
///
/// Computes f(x) = 0.5 * x^T * A * x + b^T * x + c, with gradient A * x + b
/// when A is symmetric.
#[derive(Debug, Clone)]
pub struct QuadraticCost<T: Scalar> {
    /// The quadratic form matrix (should be symmetric)
    pub a: DMatrix<T>,
    /// The linear term
    pub b: DVector<T>,
    /// The constant term
    pub c: T,
}

impl<T: Scalar> QuadraticCost<T> {
    /// Creates a new quadratic objective.
    pub fn new(a: DMatrix<T>, b: DVector<T>, c: T) -> Self {
        Self { a, b, c }
    }

    /// Creates a simple quadratic with identity matrix: f(x) = 0.5 * ||x||^2
    pub fn simple(dim: usize) -> Self {
        Self {
            a: DMatrix::identity(dim, dim),
            b: DVector::zeros(dim),
            c: T::zero(),
        }
    }
}

impl<T: Scalar> GradientFn<T> for QuadraticCost<T> {
    fn eval_at(&self, point: &DVector<T>) -> (T, DVector<T>) {
        let ax = &self.a * point;
        let value = point.dot(&ax) * <T as Scalar>::from_f64(0.5) + self.b.dot(point) + self.c;
        (value, ax + &self.b)
    }

    fn dimension(&self) -> usize {
        self.b.len()
    }
}

/// Wrapper to count objective evaluations for testing and debugging.
#[derive(Debug)]
pub struct CountingGradientFn<G> {
    /// The underlying objective
    pub inner: G,
    evaluations: Cell<usize>,
}

impl<G> CountingGradientFn<G> {
    /// Creates a new counting wrapper around an objective.
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            evaluations: Cell::new(0),
        }
    }

    /// Number of `eval_at` calls forwarded so far.
    pub fn count(&self) -> usize {
        self.evaluations.get()
    }

    /// Resets the counter to zero.
    pub fn reset_count(&self) {
        self.evaluations.set(0);
    }
}

impl<T, G> GradientFn<T> for CountingGradientFn<G>
where
    T: Scalar,
    G: GradientFn<T>,
{
    fn eval_at(&self, point: &DVector<T>) -> (T, DVector<T>) {
        self.evaluations.set(self.evaluations.get() + 1);
        self.inner.eval_at(point)
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }
}
