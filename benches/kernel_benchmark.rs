// ============================================================================
// Arithmetic Kernel Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Constants - Pi series with the cache cleared each iteration
// 2. Series - exp and log of a fixed argument
// 3. Core Arithmetic - Real division and complex multiplication
//
// Every group runs at several precisions to show how cost grows with the
// digit count.
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use scaled_real::prelude::*;
use std::hint::black_box;

const PRECISIONS: [u32; 3] = [20, 50, 100];

fn config(precision: u32) -> PrecisionConfig {
    PrecisionConfig::new(precision, true).unwrap()
}

// ============================================================================
// Constants
// ============================================================================

fn benchmark_pi(c: &mut Criterion) {
    let mut group = c.benchmark_group("pi");

    for precision in PRECISIONS.iter() {
        let cfg = config(*precision);
        let ctx = MathContext::new();
        group.bench_with_input(BenchmarkId::new("uncached", precision), &cfg, |b, cfg| {
            b.iter(|| {
                ctx.clear_caches();
                black_box(ctx.pi(*cfg).unwrap())
            });
        });

        ctx.pi(cfg).unwrap();
        group.bench_with_input(BenchmarkId::new("cached", precision), &cfg, |b, cfg| {
            b.iter(|| black_box(ctx.pi(*cfg).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Series
// ============================================================================

fn benchmark_exp(c: &mut Criterion) {
    let mut group = c.benchmark_group("exp");

    for precision in PRECISIONS.iter() {
        let x = Real::new("1.2345", config(*precision)).unwrap();
        let ctx = MathContext::new();
        group.bench_with_input(BenchmarkId::new("real", precision), &x, |b, x| {
            b.iter(|| black_box(ctx.exp(x).unwrap()));
        });

        let z = Complex::new("0.5+1.25i", config(*precision)).unwrap();
        group.bench_with_input(BenchmarkId::new("complex", precision), &z, |b, z| {
            b.iter(|| black_box(ctx.exp_complex(z).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("log");

    for precision in PRECISIONS.iter() {
        let x = Real::new("123.456", config(*precision)).unwrap();
        // log 2 stays cached across iterations, as it would in real use
        let ctx = MathContext::new();
        group.bench_with_input(BenchmarkId::new("real", precision), &x, |b, x| {
            b.iter(|| black_box(ctx.log_real(x).unwrap()));
        });

        let memo = MathContext::new().with_memo();
        group.bench_with_input(BenchmarkId::new("memoized", precision), &x, |b, x| {
            b.iter(|| black_box(memo.log_real(x).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Core Arithmetic
// ============================================================================

fn benchmark_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");

    for precision in PRECISIONS.iter() {
        let cfg = config(*precision);
        let a = Real::new("2", cfg).unwrap();
        let b = Real::new("3", cfg).unwrap();
        group.bench_with_input(BenchmarkId::new("real_div", precision), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.checked_div(b).unwrap()));
        });

        let z = Complex::new("1.25-3.5i", cfg).unwrap();
        let w = Complex::new("-0.75+2i", cfg).unwrap();
        group.bench_with_input(BenchmarkId::new("complex_mul", precision), &(&z, &w), |bench, (z, w)| {
            bench.iter(|| black_box(*z * *w));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_pi,
    benchmark_exp,
    benchmark_log,
    benchmark_arithmetic,
);
criterion_main!(benches);
