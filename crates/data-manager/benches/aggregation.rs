//! Benchmarks for window aggregation and run-length decoding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stats_charts_data::{aggregate, decode_runs, RunLengthCodec};
use stats_charts_shared::AggregationMode;

fn generate_series(rows: usize) -> Vec<(f64, Option<f64>)> {
    (0..rows)
        .map(|i| {
            let value = if i % 11 == 0 { None } else { Some((i % 97) as f64) };
            (i as f64 * 3000.0, value)
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for rows in [10_000usize, 100_000, 1_000_000] {
        let series = generate_series(rows);
        group.throughput(Throughput::Elements(rows as u64));

        // A wide window must not make the scan quadratic.
        for interval in [60_000.0, 3_600_000.0] {
            group.bench_with_input(
                BenchmarkId::new(format!("average_{interval}"), rows),
                &series,
                |b, series| {
                    b.iter(|| {
                        let result =
                            aggregate(black_box(series), Some(interval), AggregationMode::Average);
                        black_box(result);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_decode_runs(c: &mut Criterion) {
    let values: Vec<Option<f64>> = (0..1_000_000)
        .map(|i| if i % 500 < 100 { None } else { Some((i / 50) as f64) })
        .collect();
    let encoded = RunLengthCodec::default().encode(&values);

    let mut group = c.benchmark_group("decode_runs");
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("1M_values", |b| {
        b.iter(|| {
            let result = decode_runs(black_box(&encoded.data), black_box(&encoded.mutations));
            black_box(result);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_decode_runs);
criterion_main!(benches);
