//! Benchmarks for filter lookups and compilation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use idnakit_bench::spread_ranges;
use idnakit_core::UnicodeFilter;

fn bench_filter_has(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_has");

    for count in [8u32, 29, 256] {
        let filter = UnicodeFilter::from_ranges("bench", spread_ranges(count)).unwrap();
        let kind = if filter.has_matrix(0) { "matrix" } else { "ranges" };

        group.bench_with_input(BenchmarkId::new(kind, count), &filter, |b, filter| {
            b.iter(|| {
                let mut hits = 0u32;
                for cp in (0..0x1_0000).step_by(97) {
                    hits += u32::from(filter.has(black_box(cp)));
                }
                hits
            })
        });
    }

    group.finish();
}

fn bench_filter_compile(c: &mut Criterion) {
    let ranges = spread_ranges(512);
    c.bench_function("filter_compile_512", |b| {
        b.iter(|| UnicodeFilter::from_ranges("bench", black_box(ranges.clone())))
    });
}

criterion_group!(benches, bench_filter_has, bench_filter_compile);
criterion_main!(benches);
