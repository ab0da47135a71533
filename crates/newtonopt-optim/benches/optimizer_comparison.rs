//! Benchmarks comparing gradient descent and L-BFGS
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::{DMatrix, DVector};
use newtonopt_core::objective::{CachingGradientFn, QuadraticCost};
use newtonopt_optim::{GradientDescent, Minimizer, NewtonOptions, LBFGS};

/// Diagonal quadratic with condition number `dim`, minimized at the all-ones vector.
fn ill_conditioned(dim: usize) -> QuadraticCost<f64> {
    let diagonal = DVector::from_iterator(dim, (1..=dim).map(|i| i as f64));
    let a = DMatrix::from_diagonal(&diagonal);
    let b = -&diagonal;
    QuadraticCost::new(a, b, 0.0)
}

fn options() -> NewtonOptions<f64> {
    NewtonOptions::new().with_tolerance(1e-10).with_max_iterations(5_000)
}

fn benchmark_minimizers(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimizers");

    for &dim in &[10, 50, 100] {
        let f = ill_conditioned(dim);

        group.bench_with_input(BenchmarkId::new("gradient_descent", dim), &dim, |b, _| {
            let gd = GradientDescent::new(options());
            b.iter(|| gd.minimize(black_box(&f)));
        });

        for history in [3, 10] {
            group.bench_with_input(
                BenchmarkId::new(format!("lbfgs_m{history}"), dim),
                &dim,
                |b, _| {
                    let lbfgs = LBFGS::new(options(), history);
                    b.iter(|| lbfgs.minimize(black_box(&f)));
                },
            );
        }
    }

    group.finish();
}

fn benchmark_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation_cache");
    let f = ill_conditioned(100);
    let lbfgs = LBFGS::new(options(), 5);

    group.bench_function("uncached", |b| b.iter(|| lbfgs.minimize(black_box(&f))));

    for capacity in [1, 4] {
        group.bench_with_input(
            BenchmarkId::new("cached", capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let cached = CachingGradientFn::new(capacity, &f);
                    lbfgs.minimize(black_box(&cached))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_minimizers, benchmark_cache);
criterion_main!(benches);
