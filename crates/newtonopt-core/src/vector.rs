//! Elementary vector arithmetic with checked dimensions.
//!
//! Thin wrappers over `nalgebra` that return a [`VectorError`] instead of
//! panicking when lengths differ. Note that [`l2`] is the sum of squares,
//! without a square root; the line search and the convergence test are both
//! expressed in that quantity.

use crate::{
    error::{Result, VectorError},
    types::{DVector, Scalar},
};
use num_traits::Float;

fn check_equal_len<T: Scalar>(xs: &DVector<T>, ys: &DVector<T>) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(VectorError::dimension_mismatch(xs.len(), ys.len()));
    }
    Ok(())
}

/// Dot product `xs·ys`.
pub fn dot<T: Scalar>(xs: &DVector<T>, ys: &DVector<T>) -> Result<T> {
    check_equal_len(xs, ys)?;
    Ok(xs.dot(ys))
}

/// Scaled addition `alpha·xs + beta·ys` into a new vector.
pub fn add<T: Scalar>(xs: &DVector<T>, ys: &DVector<T>, alpha: T, beta: T) -> Result<DVector<T>> {
    check_equal_len(xs, ys)?;
    Ok(xs.zip_map(ys, |x, y| alpha * x + beta * y))
}

/// In-place scaled accumulate `accum += alpha·xs`.
pub fn add_in_place<T: Scalar>(accum: &mut DVector<T>, xs: &DVector<T>, alpha: T) -> Result<()> {
    check_equal_len(accum, xs)?;
    accum.axpy(alpha, xs, T::one());
    Ok(())
}

/// Returns `alpha·xs`.
pub fn scale<T: Scalar>(xs: &DVector<T>, alpha: T) -> DVector<T> {
    xs.map(|x| alpha * x)
}

/// Scales `xs` by `alpha` in place.
pub fn scale_in_place<T: Scalar>(xs: &mut DVector<T>, alpha: T) {
    xs.apply(|x| *x *= alpha);
}

/// Sum of squared components.
pub fn l2<T: Scalar>(xs: &DVector<T>) -> T {
    xs.iter().fold(T::zero(), |acc, &x| acc + x * x)
}

/// Sum of absolute values.
pub fn l1<T: Scalar>(xs: &DVector<T>) -> T {
    xs.iter().fold(T::zero(), |acc, &x| acc + <T as Float>::abs(x))
}
