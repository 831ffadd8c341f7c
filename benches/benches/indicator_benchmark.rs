//! Indicator benchmarks.
//!
//! Run with: `cargo bench --package tickplant-bench --bench indicator_benchmark`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tickplant_bench::synthetic_closes;
use tickplant_lib::indicators::{dpo, ema, normalize, rofc, rsi, sma, zscore};

fn indicator_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");

    for n in [10_000u32, 100_000] {
        let closes = synthetic_closes(n);
        group.throughput(Throughput::Elements(u64::from(n)));

        group.bench_with_input(BenchmarkId::new("sma_50", n), &closes, |b, x| {
            b.iter(|| sma(black_box(x), 50).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("ema", n), &closes, |b, x| {
            b.iter(|| ema(black_box(x), 0.1).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("rofc_10", n), &closes, |b, x| {
            b.iter(|| rofc(black_box(x), 10).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("rsi_14", n), &closes, |b, x| {
            b.iter(|| rsi(black_box(x), 14).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("dpo_20", n), &closes, |b, x| {
            b.iter(|| dpo(black_box(x), 20).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("zscore", n), &closes, |b, x| {
            b.iter(|| zscore(black_box(x)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("normalize", n), &closes, |b, x| {
            b.iter(|| normalize(black_box(x)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, indicator_benchmark);
criterion_main!(benches);
