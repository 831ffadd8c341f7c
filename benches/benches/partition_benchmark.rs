//! Partitioning benchmarks over synthetic series.
//!
//! Run with: `cargo bench --package tickplant-bench --bench partition_benchmark`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tempfile::TempDir;
use tickplant_bench::{SeriesConfig, bench_key, synthetic_ticks};
use tickplant_lib::{DateRange, PartitionWriter, TimeIndex, TradingCalendar, WritePolicy};

fn benchmark_configs() -> Vec<(&'static str, SeriesConfig)> {
    vec![
        ("5d-x1k", SeriesConfig::new(5, 1_000)),
        ("20d-x5k", SeriesConfig::new(20, 5_000)),
    ]
}

fn partition_benchmark(c: &mut Criterion) {
    let key = bench_key().unwrap();
    let calendar = TradingCalendar::weekdays_only();

    let mut group = c.benchmark_group("partition");
    group.sample_size(10);

    for (name, config) in benchmark_configs() {
        let ticks = synthetic_ticks(config);
        let range = config.range();
        group.throughput(Throughput::Elements(config.total_ticks()));

        for policy in [WritePolicy::Replace, WritePolicy::Merge] {
            let id = BenchmarkId::new(format!("{policy:?}").to_lowercase(), name);
            group.bench_with_input(id, &ticks, |b, ticks| {
                let dir = TempDir::new().unwrap();
                let writer = PartitionWriter::new(dir.path(), &calendar).with_policy(policy);
                b.iter(|| {
                    let mut input = ticks.clone();
                    writer
                        .partition(&key, &mut input, range.start, range.end)
                        .unwrap()
                });
            });
        }
    }

    group.finish();
}

fn day_slice_benchmark(c: &mut Criterion) {
    let config = SeriesConfig::new(60, 2_000);
    let ticks = synthetic_ticks(config);
    let range: DateRange = config.range();
    let index = TimeIndex::new(&ticks, range).unwrap();

    let mut group = c.benchmark_group("time_index");
    group.throughput(Throughput::Elements(range.total_days() as u64));
    group.bench_function("day_slice_all_days", |b| {
        b.iter(|| {
            range
                .days()
                .map(|day| index.day_slice(black_box(day)).unwrap().len())
                .sum::<usize>()
        });
    });
    group.finish();
}

criterion_group!(benches, partition_benchmark, day_slice_benchmark);
criterion_main!(benches);
