use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use multidose::prelude::*;
use std::hint::black_box;

fn engine(interval: f64) -> MultipleDosing {
    let params = Parameters::new(1.0, 1.5, 0.1, 50.0, 2.0, 10.0).unwrap();
    let mut engine = MultipleDosing::new(params);
    engine.set_observation_times(0.0, 168.0, interval).unwrap();
    engine
}

fn bench_concentration_at(c: &mut Criterion) {
    let engine = engine(1.0);
    c.bench_function("concentration_at", |b| {
        b.iter(|| {
            engine
                .concentration_at(black_box(500.0), black_box(37.5), black_box(12.0))
                .unwrap()
        })
    });
}

fn bench_run_regimen(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_regimen");
    for interval in [1.0, 0.1, 0.01] {
        let engine = engine(interval);
        let points = engine.observation_times().map_or(0, |t| t.len());
        group.bench_with_input(BenchmarkId::from_parameter(points), &engine, |b, e| {
            b.iter(|| e.run_regimen(black_box(500.0), black_box(12.0)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_concentration_at, bench_run_regimen);
criterion_main!(benches);
