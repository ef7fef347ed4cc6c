//! Benchmarks for indicator implementations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use idx_core::traits::{Indicator, MultiOutputIndicator};
use idx_indicators::{Ema, Macd, Rsi, Sma};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn benchmark_sma(c: &mut Criterion) {
    let mut group = c.benchmark_group("SMA");

    for size in [250, 1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("latest", size), &data, |b, data| {
            let sma = Sma::new(20);
            b.iter(|| sma.latest(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_ema(c: &mut Criterion) {
    let mut group = c.benchmark_group("EMA");

    for size in [250, 1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("series", size), &data, |b, data| {
            let ema = Ema::new(20);
            b.iter(|| ema.series(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [250, 1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("latest", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.latest(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_macd(c: &mut Criterion) {
    let mut group = c.benchmark_group("MACD");

    for size in [250, 1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("latest", size), &data, |b, data| {
            let macd = Macd::new();
            b.iter(|| MultiOutputIndicator::latest(&macd, black_box(data)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_sma,
    benchmark_ema,
    benchmark_rsi,
    benchmark_macd
);
criterion_main!(benches);
