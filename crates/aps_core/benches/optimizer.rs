//! Generator and optimizer benchmarks for aps_core.
//!
//! Run with: `cargo bench -p aps_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use aps_core::context::CannonContext;
use aps_core::generator::BlueprintGenerator;
use aps_core::optimizer::{ShellOptimizer, TopK};
use aps_core::scoring;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Enumeration cost by module budget.
pub fn generator_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator");
    for limit in [3u32, 4, 5] {
        group.bench_with_input(BenchmarkId::from_parameter(limit), &limit, |b, &limit| {
            b.iter(|| BlueprintGenerator::with_defaults(black_box(limit)).count());
        });
    }
    group.finish();
}

/// Full search including evaluation and selection.
pub fn optimizer_benchmark(c: &mut Criterion) {
    let optimizer = ShellOptimizer::new(4, 8, scoring::dps)
        .with_context(CannonContext::default().with_loaders(2, 2));
    c.bench_function("optimizer_4_modules", |b| {
        b.iter(|| optimizer.best_shells(black_box(2.0)));
    });
}

/// Selection alone over a fixed score stream.
pub fn topk_benchmark(c: &mut Criterion) {
    let scores: Vec<f64> = (0..10_000u32).map(|i| f64::from((i * 7919) % 1000)).collect();
    c.bench_function("topk_10k", |b| {
        b.iter(|| {
            let mut top = TopK::new(16);
            for (i, score) in scores.iter().enumerate() {
                top.push(*score, i);
            }
            black_box(top.into_sorted())
        });
    });
}

criterion_group!(benches, generator_benchmark, optimizer_benchmark, topk_benchmark);
criterion_main!(benches);
