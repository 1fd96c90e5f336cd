#![allow(non_snake_case)]

#[macro_use]
extern crate criterion;

use criterion::Criterion;
use rand::thread_rng;
use std::time::Duration;

use uprove_zkp::curve_arithmetic::{multi_exp_naive, Curve, RistrettoCurve};

const N: usize = 512;

pub fn msm_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Multi-Scalar Multiplication");
    let rng = &mut thread_rng();

    let bases: Vec<RistrettoCurve> = (0..N).map(|_| RistrettoCurve::generate(rng)).collect();
    let scalars: Vec<<RistrettoCurve as Curve>::Scalar> =
        (0..N).map(|_| RistrettoCurve::generate_scalar(rng)).collect();

    group.bench_function("multi_exp over Ristretto", |b| {
        b.iter(|| RistrettoCurve::multi_exp(&bases, &scalars))
    });
    group.bench_function("multi_exp_naive over Ristretto", |b| {
        b.iter(|| multi_exp_naive(&bases, &scalars))
    });
}

criterion_group!(
    name = benchmarks;
    config = Criterion::default().measurement_time(Duration::from_millis(10000)).sample_size(100);
    targets = msm_benchmark
);
criterion_main!(benchmarks);
