//! Benchmarks for header lookup, cache rebuilds and pagination.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sheetgrid::layout::{Axis, HeaderTrack, HitTester, Viewport};
use sheetgrid::print::{paginate, PrintJob, PrintSettings, PrintSheet};

fn varied_track(axis: Axis, count: u32) -> HeaderTrack {
    let mut track = HeaderTrack::new(axis, count, 20.0);
    for i in (0..count).step_by(7) {
        track.set_size(i, 20.0 + (i % 13) as f32).expect("valid size");
    }
    for i in (0..count).step_by(101) {
        track.set_visible(i, false).expect("valid index");
    }
    track
}

/// Binary search over cumulative positions at increasing track sizes
fn bench_find_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_index_at_position");

    for count in [1_000_u32, 100_000, 1_000_000] {
        let track = varied_track(Axis::Row, count);
        let total = track.total_extent();
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(count), &track, |b, track| {
            let mut pos = 0.0_f32;
            b.iter(|| {
                pos = (pos + 7919.0) % total;
                track.find_index_at_position(black_box(pos))
            })
        });
    }

    group.finish();
}

/// Separator-aware hit test under zoom
fn bench_hit_test(c: &mut Criterion) {
    let track = varied_track(Axis::Column, 100_000);
    let mut viewport = Viewport::new();
    viewport.set_scale(1.5);
    viewport.scroll_x = 250_000.0;

    c.bench_function("hit_test_locate", |b| {
        let tester = HitTester::new(&track, &viewport);
        b.iter(|| tester.locate(black_box(437.0)))
    });
}

/// Mutation followed by the lazy cumulative rebuild
fn bench_resize_then_query(c: &mut Criterion) {
    let mut track = varied_track(Axis::Row, 100_000);

    c.bench_function("set_size_then_position", |b| {
        let mut size = 20.0_f32;
        b.iter(|| {
            size = if size > 40.0 { 20.0 } else { size + 1.0 };
            track.set_size(black_box(500), size).unwrap();
            track.position(black_box(99_999))
        })
    });
}

/// Auto-split and page enumeration of a large sheet
fn bench_paginate(c: &mut Criterion) {
    let sheet = PrintSheet::new(
        "Large",
        varied_track(Axis::Row, 50_000),
        varied_track(Axis::Column, 200),
    );
    let job = PrintJob::new(vec![sheet], PrintSettings::default());

    c.bench_function("paginate_50000x200", |b| {
        b.iter(|| paginate(black_box(&job)).expect("pagination"))
    });
}

criterion_group!(
    benches,
    bench_find_index,
    bench_hit_test,
    bench_resize_then_query,
    bench_paginate,
);

criterion_main!(benches);
