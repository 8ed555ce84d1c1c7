//! Align, transform and export benchmarks over synthetic groups.
//!
//! Run with: `cargo bench --package macrodash-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use macrodash_bench::{GroupShape, synthetic_group};
use macrodash_lib::{CsvFormatter, Formatter, Frequency, Transformer, align};
use std::hint::black_box;

/// Group shapes roughly matching the builtin catalog over decades of data.
fn shapes() -> Vec<(&'static str, GroupShape)> {
    vec![
        (
            "quarterly",
            GroupShape {
                frequency: Frequency::Quarterly,
                series: 16,
                periods: 320,
                gap_every: 0,
            },
        ),
        (
            "monthly",
            GroupShape {
                frequency: Frequency::Monthly,
                series: 15,
                periods: 960,
                gap_every: 97,
            },
        ),
        (
            "weekly",
            GroupShape {
                frequency: Frequency::Weekly,
                series: 4,
                periods: 3000,
                gap_every: 0,
            },
        ),
    ]
}

fn align_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");
    for (name, shape) in shapes() {
        let input = synthetic_group(shape);
        group.throughput(Throughput::Elements((shape.series * shape.periods) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| align(shape.frequency, black_box(input.clone())));
        });
    }
    group.finish();
}

fn transform_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    for (name, shape) in shapes() {
        let table = align(shape.frequency, synthetic_group(shape));
        let transformer = Transformer::for_frequency(shape.frequency);
        group.bench_with_input(BenchmarkId::from_parameter(name), &table, |b, table| {
            b.iter(|| transformer.transform(black_box(table.clone())));
        });
    }
    group.finish();
}

fn export_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_csv");
    for (name, shape) in shapes() {
        let table = Transformer::for_frequency(shape.frequency)
            .transform(align(shape.frequency, synthetic_group(shape)));
        let formatter = CsvFormatter::new();
        group.bench_with_input(BenchmarkId::from_parameter(name), &table, |b, table| {
            b.iter(|| {
                let mut out = Vec::with_capacity(64 * 1024);
                formatter
                    .write_table(black_box(table), &mut out)
                    .expect("in-memory write");
                out
            });
        });
    }
    group.finish();
}

criterion_group!(benches, align_benchmark, transform_benchmark, export_benchmark);
criterion_main!(benches);
