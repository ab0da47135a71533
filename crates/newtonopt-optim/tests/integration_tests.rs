//! Integration tests for newtonopt-optim
//!
//! These tests run the minimizers end to end on small analytic objectives
//! and check the behaviour shared through the core iteration loop.

use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};
use newtonopt_core::{
    error::OptimizerError,
    objective::{CachingGradientFn, CountingGradientFn, FnGradient, GradientFn, QuadraticCost},
};
use newtonopt_optim::{GradientDescent, Minimizer, NewtonOptions, TerminationReason, LBFGS};
use pretty_assertions::assert_eq;

fn x_squared() -> impl GradientFn<f64> {
    FnGradient::new(1, |x: &DVector<f64>| {
        (x[0] * x[0], DVector::from_element(1, 2.0 * x[0]))
    })
}

/// (x - 1)^4 + (y + 2)^4
fn quartic() -> impl GradientFn<f64> {
    FnGradient::new(2, |p: &DVector<f64>| {
        let (a, b) = (p[0] - 1.0, p[1] + 2.0);
        (
            a.powi(4) + b.powi(4),
            DVector::from_vec(vec![4.0 * a.powi(3), 4.0 * b.powi(3)]),
        )
    })
}

/// 0.5 (3x^2 + y^2 + 2xy) - x - y, minimized at (0, 1) with value -0.5
fn coupled_quadratic() -> QuadraticCost<f64> {
    QuadraticCost::new(
        DMatrix::from_row_slice(2, 2, &[3.0, 1.0, 1.0, 1.0]),
        DVector::from_vec(vec![-1.0, -1.0]),
        0.0,
    )
}

#[test]
fn test_x_squared_from_one() {
    let options = NewtonOptions::new().with_initial_guess(DVector::from_element(1, 1.0));

    let gd = GradientDescent::new(options.clone()).minimize(&x_squared()).unwrap();
    assert_eq!(gd.point[0], 0.0);
    assert_eq!(gd.value, 0.0);

    let lbfgs = LBFGS::new(options, 5).minimize(&x_squared()).unwrap();
    assert_eq!(lbfgs.point[0], 0.0);
    assert_eq!(lbfgs.value, 0.0);
}

#[test]
fn test_quartic_gradient_descent() {
    let gd = GradientDescent::new(NewtonOptions::new().with_tolerance(1e-5));
    let result = gd.minimize(&quartic()).unwrap();

    assert!(result.converged);
    assert!(result.value < 1e-4, "value = {}", result.value);
}

#[test]
fn test_quartic_lbfgs() {
    for history in [2, 5] {
        let lbfgs = LBFGS::new(NewtonOptions::new().with_tolerance(1e-5), history);
        let result = lbfgs.minimize(&quartic()).unwrap();

        assert!(result.converged);
        assert!(result.value < 1e-4, "history {history}: value = {}", result.value);
    }
}

#[test]
fn test_lbfgs_needs_fewer_iterations_on_coupled_quadratic() {
    let options = NewtonOptions::new().with_tolerance(1e-12);
    let f = coupled_quadratic();

    let gd = GradientDescent::new(options.clone()).minimize(&f).unwrap();
    let lbfgs = LBFGS::new(options, 5).minimize(&f).unwrap();

    for result in [&gd, &lbfgs] {
        assert!(result.converged);
        assert_relative_eq!(result.point, DVector::from_vec(vec![0.0, 1.0]), epsilon = 1e-5);
        assert_relative_eq!(result.value, -0.5, epsilon = 1e-10);
    }
    assert!(
        lbfgs.iterations < gd.iterations,
        "L-BFGS took {} iterations, gradient descent {}",
        lbfgs.iterations,
        gd.iterations
    );
}

#[test]
fn test_zero_history_matches_gradient_descent() {
    let options = NewtonOptions::new()
        .with_initial_guess(DVector::from_vec(vec![2.0, -1.0]))
        .with_tolerance(1e-10);

    let (quadratic, quartic) = (coupled_quadratic(), quartic());
    let objectives: [&dyn GradientFn<f64>; 2] = [&quadratic, &quartic];
    for f in objectives {
        let gd = GradientDescent::new(options.clone()).minimize(f).unwrap();
        let lbfgs = LBFGS::new(options.clone(), 0).minimize(f).unwrap();

        assert_eq!(lbfgs.point, gd.point);
        assert_eq!(lbfgs.value, gd.value);
        assert_eq!(lbfgs.iterations, gd.iterations);
        assert_eq!(lbfgs.function_evaluations, gd.function_evaluations);
    }
}

#[test]
fn test_iteration_cap_stops_early() {
    let options = NewtonOptions::new().with_max_iterations(2).with_tolerance(1e-12);
    let f = coupled_quadratic();

    for result in [
        GradientDescent::new(options.clone()).minimize(&f).unwrap(),
        LBFGS::new(options.clone(), 3).minimize(&f).unwrap(),
    ] {
        assert_eq!(result.iterations, 2);
        assert_eq!(result.termination_reason, TerminationReason::MaxIterations);
        assert!(!result.converged);
    }
}

#[test]
fn test_zero_cap_means_unbounded() {
    let options = NewtonOptions::new().with_max_iterations(0).with_tolerance(1e-12);
    let result = GradientDescent::new(options).minimize(&coupled_quadratic()).unwrap();

    assert!(result.iterations > 0);
    assert_eq!(result.termination_reason, TerminationReason::Converged);
}

#[test]
fn test_cached_objective_gives_same_result() {
    let options = NewtonOptions::new().with_tolerance(1e-10);
    let lbfgs = LBFGS::new(options, 4);

    let plain = CountingGradientFn::new(coupled_quadratic());
    let uncached = lbfgs.minimize(&plain).unwrap();

    let inner = CountingGradientFn::new(coupled_quadratic());
    let cached = CachingGradientFn::new(3, &inner);
    let result = lbfgs.minimize(&cached).unwrap();

    assert_eq!(result.point, uncached.point);
    assert_eq!(result.iterations, uncached.iterations);
    assert_eq!(uncached.function_evaluations, plain.count());
    assert_eq!(result.function_evaluations, plain.count());
    assert!(inner.count() < plain.count());

    let (hits, misses) = cached.cache_stats();
    assert_eq!(misses, inner.count());
    assert_eq!(hits + misses, result.function_evaluations);
}

#[test]
fn test_non_positive_curvature_surfaces() {
    // sin is concave on (0, pi): the first secant pair has s·y < 0
    let f = FnGradient::new(1, |x: &DVector<f64>| {
        (x[0].sin(), DVector::from_element(1, x[0].cos()))
    });
    let options = NewtonOptions::new().with_initial_guess(DVector::from_element(1, 1.0));

    let err = LBFGS::new(options.clone(), 3).minimize(&f).unwrap_err();
    assert!(matches!(err, OptimizerError::NonPositiveCurvature { curvature } if curvature < 0.0));

    // Gradient descent has no curvature requirement
    assert!(GradientDescent::new(options.with_max_iterations(5)).minimize(&f).is_ok());
}

#[test]
fn test_wrong_gradient_fails_line_search() {
    // Gradient with the wrong sign turns every direction into an ascent direction
    let f = FnGradient::new(1, |x: &DVector<f64>| {
        (x[0] * x[0], DVector::from_element(1, -2.0 * x[0]))
    });
    let options = NewtonOptions::new().with_initial_guess(DVector::from_element(1, 1.0));

    let err = GradientDescent::new(options).minimize(&f).unwrap_err();
    assert!(matches!(err, OptimizerError::LineSearchFailed { .. }));
}

#[test]
fn test_initial_guess_dimension_mismatch() {
    let options = NewtonOptions::new().with_initial_guess(DVector::zeros(3));
    let err = LBFGS::new(options, 3).minimize(&quartic()).unwrap_err();
    assert_eq!(err, OptimizerError::dimension_mismatch(2, 3));
}

#[test]
fn test_invalid_backtrack_rejected() {
    let f = CountingGradientFn::new(quartic());
    let err = GradientDescent::new(NewtonOptions::new().with_backtrack(0.0))
        .minimize(&f)
        .unwrap_err();

    assert!(matches!(err, OptimizerError::InvalidConfiguration { .. }));
    assert_eq!(f.count(), 0);
}

#[test]
fn test_single_precision() {
    let f = QuadraticCost::<f32>::simple(3);
    let options =
        NewtonOptions::new().with_initial_guess(DVector::from_vec(vec![1.0f32, -2.0, 0.5]));

    let result = LBFGS::new(options, 3).minimize(&f).unwrap();
    assert!(result.converged);
    assert!(result.value.abs() < 1e-6);
}
