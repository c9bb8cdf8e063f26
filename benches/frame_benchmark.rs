//! Frame Benchmarks
//!
//! Grouping, pivoting, sorting and concatenation over synthetic frames of growing size.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nestframe::{concat, DataColumn, DataFrame, Stat, Value};

/// Create a synthetic frame with a low-cardinality key and two numeric columns
fn create_dataset(n_rows: usize) -> DataFrame {
    // Simple LCG random generator for reproducibility
    let mut state: u64 = 42;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (state >> 33) as f64 / (u32::MAX as f64)
    };

    let keys: Vec<Value> = (0..n_rows).map(|i| Value::from(format!("k{}", i % 16))).collect();
    let ints: Vec<Value> = (0..n_rows).map(|i| Value::Int(i as i32)).collect();
    let doubles: Vec<Value> = (0..n_rows).map(|_| Value::Double(next())).collect();

    DataFrame::from_columns(vec![
        DataColumn::value("key", keys),
        DataColumn::value("n", ints),
        DataColumn::value("x", doubles),
    ])
    .unwrap()
}

fn bench_group_by(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by");
    for size in [1_000, 10_000, 100_000] {
        let df = create_dataset(size);
        group.bench_with_input(BenchmarkId::new("mean_for", size), &df, |b, df| {
            b.iter(|| df.group_by("key").unwrap().mean_for("x").unwrap())
        });
    }
    group.finish();
}

fn bench_pivot(c: &mut Criterion) {
    let mut group = c.benchmark_group("pivot");
    for size in [1_000, 10_000] {
        let df = create_dataset(size);
        group.bench_with_input(BenchmarkId::new("aggregate_stat", size), &df, |b, df| {
            b.iter(|| df.pivot("key").aggregate_stat("x", &Stat::sum()).unwrap())
        });
    }
    group.finish();
}

fn bench_sort_and_concat(c: &mut Criterion) {
    let mut group = c.benchmark_group("rows");
    for size in [1_000, 10_000] {
        let df = create_dataset(size);
        group.bench_with_input(BenchmarkId::new("sort_by", size), &df, |b, df| {
            b.iter(|| df.sort_by("x").unwrap())
        });
        let parts: Vec<DataFrame> = df.chunked(100).unwrap().frames().to_vec();
        group.bench_with_input(BenchmarkId::new("concat", size), &parts, |b, parts| {
            b.iter(|| concat(parts).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_group_by, bench_pivot, bench_sort_and_concat);
criterion_main!(benches);
