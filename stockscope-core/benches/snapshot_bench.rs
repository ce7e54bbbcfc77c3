//! Criterion benchmarks for StockScope hot paths.
//!
//! Benchmarks:
//! 1. Individual calculators over typical history lengths
//! 2. Full snapshot build (validation + every indicator + formatting)
//! 3. Parallel batch of snapshots
//! 4. Cached snapshot lookup

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stockscope_core::indicators::{
    Atr, Bollinger, Calculator, LevelFinder, Macd, Rsi, Sma, Stochastic,
};
use stockscope_core::{
    compute_snapshots, PriceBar, PriceSeries, SnapshotBuilder, SnapshotCache, SnapshotRequest,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<PriceBar> {
    let base = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let open = close - 0.3;
            PriceBar::new(
                base + Duration::days(i as i64),
                open,
                close + 1.5,
                close - 1.5,
                close,
                1_000_000.0 + (i as f64 * 0.37).cos() * 250_000.0,
            )
        })
        .collect()
}

// ── 1. Calculators ───────────────────────────────────────────────────

fn bench_calculators(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculators");

    for &bar_count in &[252, 1260, 2520] {
        let bars = make_bars(bar_count);

        group.bench_with_input(BenchmarkId::new("sma_50", bar_count), &bars, |b, bars| {
            b.iter(|| Sma::new(50).compute(black_box(bars)))
        });
        group.bench_with_input(BenchmarkId::new("rsi_14", bar_count), &bars, |b, bars| {
            b.iter(|| Rsi::new(14).compute(black_box(bars)))
        });
        group.bench_with_input(BenchmarkId::new("macd", bar_count), &bars, |b, bars| {
            b.iter(|| Macd::default().compute(black_box(bars)))
        });
        group.bench_with_input(BenchmarkId::new("bollinger", bar_count), &bars, |b, bars| {
            b.iter(|| Bollinger::default().series(black_box(bars)))
        });
        group.bench_with_input(BenchmarkId::new("stochastic", bar_count), &bars, |b, bars| {
            b.iter(|| Stochastic::default().series(black_box(bars)))
        });
        group.bench_with_input(BenchmarkId::new("atr_14", bar_count), &bars, |b, bars| {
            b.iter(|| Atr::new(14).compute(black_box(bars)))
        });
        group.bench_with_input(BenchmarkId::new("levels", bar_count), &bars, |b, bars| {
            b.iter(|| LevelFinder::default().compute(black_box(bars)))
        });
    }

    group.finish();
}

// ── 2. Snapshot build ────────────────────────────────────────────────

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_build");
    let builder = SnapshotBuilder::default();

    for &bar_count in &[60, 252, 2520] {
        let series = PriceSeries::new(make_bars(bar_count));
        group.bench_with_input(
            BenchmarkId::from_parameter(bar_count),
            &series,
            |b, series| b.iter(|| builder.build(black_box(series), "BENCH", false, "USD")),
        );
    }

    group.finish();
}

// ── 3. Batch ─────────────────────────────────────────────────────────

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_batch");
    let builder = SnapshotBuilder::default();

    for &symbols in &[10, 100] {
        let requests: Vec<SnapshotRequest> = (0..symbols)
            .map(|i| {
                SnapshotRequest::new(
                    format!("SYM{i}"),
                    PriceSeries::new(make_bars(252)),
                    i % 2 == 0,
                    "USD",
                )
            })
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(symbols),
            &requests,
            |b, requests| b.iter(|| compute_snapshots(&builder, black_box(requests))),
        );
    }

    group.finish();
}

// ── 4. Cache hit ─────────────────────────────────────────────────────

fn bench_cache_hit(c: &mut Criterion) {
    let builder = SnapshotBuilder::default();
    let cache = SnapshotCache::new();
    let request = SnapshotRequest::new("HIT", PriceSeries::new(make_bars(252)), false, "USD");
    let _ = cache.snapshot(&builder, &request);

    // Includes fingerprinting the series on every lookup
    c.bench_function("snapshot_cache_hit_252", |b| {
        b.iter(|| cache.snapshot(&builder, black_box(&request)))
    });
}

criterion_group!(
    benches,
    bench_calculators,
    bench_snapshot,
    bench_batch,
    bench_cache_hit,
);
criterion_main!(benches);
