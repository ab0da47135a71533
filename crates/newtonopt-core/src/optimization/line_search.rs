//! Backtracking line search.
//!
//! Given a point `x` and a search direction `d`, the searcher looks for a
//! step length `t` satisfying the Armijo sufficient decrease condition
//!
//! ```text
//! f(x + t d) <= f(x) + c1 t <grad f(x), d>
//! ```
//!
//! starting from `t = 1` and multiplying by the backtracking factor `rho`
//! after every rejected trial. When the step length drops to the minimum
//! step size without an accepted trial the search fails.
//!
//! If the gradient at `x` is already negligible (its sum of squares is below
//! the minimum step size) the search returns a zero step without trying
//! anything.
//!
//! # Example
//!
//! ```rust
//! use newtonopt_core::objective::FnGradient;
//! use newtonopt_core::optimization::line_search::BacktrackingLineSearch;
//! use nalgebra::DVector;
//!
//! let x_squared = FnGradient::new(1, |x: &DVector<f64>| {
//!     (x[0] * x[0], DVector::from_element(1, 2.0 * x[0]))
//! });
//!
//! let search = BacktrackingLineSearch::new(0.5);
//! let result = search
//!     .search(&x_squared, &DVector::from_element(1, 1.0), &DVector::from_element(1, -1.0))
//!     .unwrap();
//! assert_eq!((result.step_size, result.new_value), (1.0, 0.0));
//! ```

use crate::{
    error::{OptimizerError, OptimizerResult},
    objective::GradientFn,
    types::{DVector, Scalar},
    vector,
};
use tracing::{trace, warn};

/// Outcome of a successful line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearchResult<T>
where
    T: Scalar,
{
    /// The accepted step length `t`, or zero at a stationary point
    pub step_size: T,

    /// The objective value at `x + t d`
    pub new_value: T,

    /// Objective evaluations performed, including the one at `x`
    pub function_evals: usize,
}

/// Parameters of the backtracking line search.
///
/// # Parameter Guidelines
///
/// - **rho**: backtracking factor in (0, 1). `0.5` halves the trial step
///   after every rejection; values close to 1 backtrack more finely at the
///   cost of more evaluations.
/// - **c1**: sufficient decrease coefficient in (0, 0.5).
/// - **min_step_size**: positive threshold below which the search gives up.
///   It doubles as the stationarity threshold on the squared gradient norm.
///
/// ```rust
/// # use newtonopt_core::optimization::line_search::LineSearchParams;
/// let params = LineSearchParams::<f64>::default()
///     .with_rho(0.8)
///     .with_c1(1e-4);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSearchParams<T>
where
    T: Scalar,
{
    /// Backtracking reduction factor ρ ∈ (0,1)
    pub rho: T,

    /// Armijo parameter c₁ ∈ (0,0.5) for the sufficient decrease condition
    pub c1: T,

    /// Minimum step size threshold before declaring line search failure
    pub min_step_size: T,
}

impl<T> Default for LineSearchParams<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            rho: <T as Scalar>::from_f64(0.5),
            c1: <T as Scalar>::from_f64(0.01),
            min_step_size: T::MIN_STEP_SIZE,
        }
    }
}

impl<T> LineSearchParams<T>
where
    T: Scalar,
{
    /// Creates default parameters with the given backtracking factor.
    pub fn new(rho: T) -> Self {
        Self::default().with_rho(rho)
    }

    /// Sets the backtracking factor.
    pub fn with_rho(mut self, rho: T) -> Self {
        self.rho = rho;
        self
    }

    /// Sets the sufficient decrease coefficient.
    pub fn with_c1(mut self, c1: T) -> Self {
        self.c1 = c1;
        self
    }

    /// Sets the minimum step size.
    pub fn with_min_step_size(mut self, min_step_size: T) -> Self {
        self.min_step_size = min_step_size;
        self
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `OptimizerError::InvalidConfiguration` if `rho ∉ (0, 1)`,
    /// `c1 ∉ (0, 0.5)` or `min_step_size <= 0` (NaN fails every check).
    pub fn validate(&self) -> OptimizerResult<()> {
        if !(self.rho > T::zero() && self.rho < T::one()) {
            return Err(OptimizerError::invalid_configuration(
                "Backtracking factor must be in (0, 1)",
                "rho",
                self.rho.to_string(),
            ));
        }

        if !(self.c1 > T::zero() && self.c1 < <T as Scalar>::from_f64(0.5)) {
            return Err(OptimizerError::invalid_configuration(
                "Sufficient decrease coefficient must be in (0, 0.5)",
                "c1",
                self.c1.to_string(),
            ));
        }

        if !(self.min_step_size > T::zero()) {
            return Err(OptimizerError::invalid_configuration(
                "Minimum step size must be positive",
                "min_step_size",
                self.min_step_size.to_string(),
            ));
        }

        Ok(())
    }
}

/// Armijo backtracking line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktrackingLineSearch<T>
where
    T: Scalar,
{
    params: LineSearchParams<T>,
}

impl<T> BacktrackingLineSearch<T>
where
    T: Scalar,
{
    /// Creates a line search with backtracking factor `rho` and default
    /// `c1` and minimum step size.
    pub fn new(rho: T) -> Self {
        Self::with_params(LineSearchParams::new(rho))
    }

    /// Creates a line search from explicit parameters.
    pub fn with_params(params: LineSearchParams<T>) -> Self {
        Self { params }
    }

    /// Name of the line search.
    pub fn name(&self) -> &str {
        "Backtracking"
    }

    /// Searches along `direction` from `point`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if the parameters do not validate.
    /// - `Vector(DimensionMismatch)` if the direction or the gradient does
    ///   not have the length of `point`.
    /// - `LineSearchFailed` if no trial step above the minimum step size
    ///   satisfies the sufficient decrease condition. This is what happens
    ///   along an ascent direction.
    pub fn search<G>(
        &self,
        f: &G,
        point: &DVector<T>,
        direction: &DVector<T>,
    ) -> OptimizerResult<LineSearchResult<T>>
    where
        G: GradientFn<T> + ?Sized,
    {
        self.params.validate()?;

        let (value, gradient) = f.eval_at(point);
        let mut function_evals = 1;

        if gradient.len() != point.len() {
            return Err(OptimizerError::dimension_mismatch(point.len(), gradient.len()));
        }

        if vector::l2(&gradient) < self.params.min_step_size {
            return Ok(LineSearchResult {
                step_size: T::zero(),
                new_value: value,
                function_evals,
            });
        }

        let slope = self.params.c1 * vector::dot(&gradient, direction)?;

        let mut step_size = T::one();
        let mut trials = 0;
        while step_size > self.params.min_step_size {
            let trial = vector::add(point, direction, T::one(), step_size)?;
            let (new_value, _) = f.eval_at(&trial);
            function_evals += 1;
            trials += 1;

            trace!(
                trial = trials,
                step_size = Scalar::to_f64(step_size),
                value = Scalar::to_f64(new_value),
                "backtracking trial"
            );

            if new_value <= value + step_size * slope {
                return Ok(LineSearchResult {
                    step_size,
                    new_value,
                    function_evals,
                });
            }

            step_size *= self.params.rho;
        }

        warn!(
            trials,
            step_size = Scalar::to_f64(step_size),
            value = Scalar::to_f64(value),
            "line search step size underflow"
        );
        Err(OptimizerError::line_search_failed(
            "step size fell below the minimum without sufficient decrease",
            trials,
            Scalar::to_f64(step_size),
            Scalar::to_f64(value),
        ))
    }
}

impl<T> Default for BacktrackingLineSearch<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self::with_params(LineSearchParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::{CountingGradientFn, FnGradient, QuadraticCost};
    use approx::assert_relative_eq;

    fn x_squared() -> impl GradientFn<f64> {
        FnGradient::new(1, |x: &DVector<f64>| {
            (x[0] * x[0], DVector::from_element(1, 2.0 * x[0]))
        })
    }

    fn scalar(x: f64) -> DVector<f64> {
        DVector::from_element(1, x)
    }

    #[test]
    fn test_default_params() {
        let params = LineSearchParams::<f64>::default();
        assert_eq!(params.rho, 0.5);
        assert_eq!(params.c1, 0.01);
        assert_eq!(params.min_step_size, 1e-10);
        assert!(params.validate().is_ok());
        assert_eq!(LineSearchParams::new(0.5), params);
        assert_eq!(BacktrackingLineSearch::with_params(params).name(), "Backtracking");
    }

    #[test]
    fn test_params_validation() {
        for rho in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = LineSearchParams::new(rho).validate().unwrap_err();
            assert!(matches!(
                err,
                OptimizerError::InvalidConfiguration { ref parameter, .. } if parameter == "rho"
            ));
        }

        assert!(LineSearchParams::<f64>::default().with_c1(0.5).validate().is_err());
        assert!(LineSearchParams::<f64>::default().with_c1(0.0).validate().is_err());
        assert!(LineSearchParams::<f64>::default()
            .with_min_step_size(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_full_step_accepted() {
        let result = BacktrackingLineSearch::new(0.5)
            .search(&x_squared(), &scalar(1.0), &scalar(-1.0))
            .unwrap();

        assert_eq!(result.step_size, 1.0);
        assert_eq!(result.new_value, 0.0);
        assert_eq!(result.function_evals, 2);
    }

    #[test]
    fn test_stationary_point_returns_zero_step() {
        let f = CountingGradientFn::new(x_squared());
        let result = BacktrackingLineSearch::new(0.5)
            .search(&f, &scalar(0.0), &scalar(-1.0))
            .unwrap();

        assert_eq!((result.step_size, result.new_value), (0.0, 0.0));
        assert_eq!(f.count(), 1);
    }

    #[test]
    fn test_small_gradient_above_step_floor_still_searches() {
        // l2(grad) = 0.0016 is below c1 but above the minimum step size
        let result = BacktrackingLineSearch::new(0.5)
            .search(&x_squared(), &scalar(0.02), &scalar(-0.04))
            .unwrap();

        assert_eq!(result.step_size, 0.5);
        assert_eq!(result.new_value, 0.0);
    }

    #[test]
    fn test_backtracks_on_overshoot() {
        // The full step overshoots to -2, one halving lands on -0.5
        let result = BacktrackingLineSearch::new(0.5)
            .search(&x_squared(), &scalar(1.0), &scalar(-3.0))
            .unwrap();

        assert_relative_eq!(result.step_size, 0.5);
        assert_relative_eq!(result.new_value, 0.25);
        assert_eq!(result.function_evals, 3);
    }

    #[test]
    fn test_sufficient_decrease_holds() {
        let f = QuadraticCost::new(
            nalgebra::DMatrix::from_row_slice(2, 2, &[10.0, 0.0, 0.0, 1.0]),
            DVector::zeros(2),
            0.0,
        );
        let x = DVector::from_vec(vec![1.0, 1.0]);
        let (f0, g) = f.eval_at(&x);
        let d = -g.clone();

        let params = LineSearchParams::default();
        let result = BacktrackingLineSearch::with_params(params)
            .search(&f, &x, &d)
            .unwrap();

        assert!(result.step_size > 0.0);
        assert!(result.new_value <= f0 + result.step_size * (params.c1 * g.dot(&d)));
    }

    #[test]
    fn test_ascent_direction_fails() {
        let err = BacktrackingLineSearch::new(0.5)
            .search(&x_squared(), &scalar(1.0), &scalar(1.0))
            .unwrap_err();

        match err {
            OptimizerError::LineSearchFailed {
                iterations,
                last_step_size,
                initial_value,
                ..
            } => {
                // 1, 1/2, ..., 2^-33 are tried before dropping below 1e-10
                assert_eq!(iterations, 34);
                assert!(last_step_size <= 1e-10);
                assert_eq!(initial_value, 1.0);
            }
            other => panic!("Expected LineSearchFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_direction_length_mismatch() {
        let err = BacktrackingLineSearch::new(0.5)
            .search(&x_squared(), &scalar(1.0), &DVector::from_vec(vec![-1.0, 0.0]))
            .unwrap_err();
        assert_eq!(err, OptimizerError::dimension_mismatch(1, 2));
    }

    #[test]
    fn test_invalid_rho_rejected_before_evaluating() {
        let f = CountingGradientFn::new(x_squared());
        let result = BacktrackingLineSearch::new(1.0).search(&f, &scalar(1.0), &scalar(-1.0));

        assert!(matches!(result, Err(OptimizerError::InvalidConfiguration { .. })));
        assert_eq!(f.count(), 0);
    }
}
