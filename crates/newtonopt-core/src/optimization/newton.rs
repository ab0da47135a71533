//! The Newton-style iteration loop shared by every minimizer.

use crate::{
    error::{OptimizerError, OptimizerResult},
    objective::GradientFn,
    optimization::{
        direction::{DirectionStrategy, InverseHessianMultiply},
        line_search::BacktrackingLineSearch,
        optimizer::{NewtonOptions, OptimizationResult, TerminationReason},
    },
    types::{DVector, Scalar},
    vector,
};
use num_traits::Float;
use std::time::Instant;
use tracing::{debug, warn};

/// Relative improvement `|f - f_new| / |f_new|`, zero when the values are equal.
pub fn relative_improvement<T: Scalar>(value: T, new_value: T) -> T {
    if value == new_value {
        T::zero()
    } else {
        <T as Float>::abs(value - new_value) / <T as Float>::abs(new_value)
    }
}

/// Runs the Newton-style loop on `f` with the given direction strategy.
///
/// The value and gradient at the current iterate are carried over from the
/// previous iteration, so the loop itself evaluates `f` once per iteration
/// plus once at the start. The line search evaluates the current iterate
/// again; wrap `f` in a [`CachingGradientFn`] to make that repeat free.
///
/// # Errors
///
/// - `InvalidConfiguration` if `options` does not validate.
/// - `Vector(DimensionMismatch)` if the initial guess or a gradient does not
///   have the length of `f.dimension()`.
/// - `LineSearchFailed` if no acceptable step is found.
/// - `NonDescentStep` if an accepted step increases the objective.
/// - Whatever the strategy reports from [`DirectionStrategy::at_point`].
///
/// [`CachingGradientFn`]: crate::objective::CachingGradientFn
pub fn newton_minimize<T, G, S>(
    f: &G,
    strategy: &mut S,
    options: &NewtonOptions<T>,
) -> OptimizerResult<OptimizationResult<T>>
where
    T: Scalar,
    G: GradientFn<T> + ?Sized,
    S: DirectionStrategy<T>,
{
    options.validate()?;
    let start = Instant::now();

    let dimension = f.dimension();
    let mut point = match &options.initial_guess {
        Some(guess) if guess.len() != dimension => {
            return Err(OptimizerError::dimension_mismatch(dimension, guess.len()));
        }
        Some(guess) => guess.clone(),
        None => DVector::zeros(dimension),
    };

    let (mut value, mut gradient) = f.eval_at(&point);
    let mut function_evaluations = 1;
    check_gradient_len(&gradient, dimension)?;

    let cap = options.iteration_cap();
    let mut iteration = 0;

    let termination_reason = loop {
        if cap.is_some_and(|max| iteration >= max) {
            break TerminationReason::MaxIterations;
        }

        let mut direction = strategy.at_point(&point, &gradient)?.multiply(&gradient)?;
        vector::scale_in_place(&mut direction, -T::one());

        let line_search =
            BacktrackingLineSearch::with_params(options.line_search_params(iteration));
        let step = line_search.search(f, &point, &direction)?;
        function_evaluations += step.function_evals;

        let new_point = vector::add(&point, &direction, T::one(), step.step_size)?;
        let (new_value, new_gradient) = f.eval_at(&new_point);
        function_evaluations += 1;
        check_gradient_len(&new_gradient, dimension)?;

        if new_value > value {
            warn!(
                iteration,
                value = Scalar::to_f64(value),
                new_value = Scalar::to_f64(new_value),
                "accepted step increased the objective"
            );
            return Err(OptimizerError::non_descent_step(
                Scalar::to_f64(value),
                Scalar::to_f64(new_value),
            ));
        }

        let reldiff = relative_improvement(value, new_value);
        let gradient_norm = vector::l2(&new_gradient);

        debug!(
            iteration,
            strategy = strategy.name(),
            line_search = line_search.name(),
            value = Scalar::to_f64(value),
            new_value = Scalar::to_f64(new_value),
            step_size = Scalar::to_f64(step.step_size),
            reldiff = Scalar::to_f64(reldiff),
            gradient_norm = Scalar::to_f64(gradient_norm),
            "iteration finished"
        );

        point = new_point;
        value = new_value;
        gradient = new_gradient;
        iteration += 1;

        if reldiff <= options.tolerance || gradient_norm <= options.tolerance {
            break TerminationReason::Converged;
        }
    };

    Ok(
        OptimizationResult::new(point, value, iteration, start.elapsed(), termination_reason)
            .with_gradient_norm(vector::l2(&gradient))
            .with_function_evaluations(function_evaluations),
    )
}

fn check_gradient_len<T: Scalar>(gradient: &DVector<T>, dimension: usize) -> OptimizerResult<()> {
    if gradient.len() != dimension {
        return Err(OptimizerError::dimension_mismatch(dimension, gradient.len()));
    }
    Ok(())
}
