use std::hint::black_box;

use lockbox_core::config::RampConfig;
use lockbox_driver::ramp::allocator::{
    AllocationLimits, DirectScan, RatioSearch, SegmentAllocator,
};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const TEST_SIZES: &[(f64, f64)] = &[
    (100., 300.),
    (8191., 41666.),
    (12.5, 400_000.),
    (5000.3, 5001.7),
];

fn allocate<A: SegmentAllocator>(c: &mut Criterion, name: &str, allocator: A) {
    let mut group = c.benchmark_group(format!("lockbox/allocator/{}", name));
    let limits = AllocationLimits::from(&RampConfig::default());

    TEST_SIZES.iter().for_each(|&(v, t)| {
        group.bench_with_input(
            BenchmarkId::new(name, format!("{}x{}", v, t)),
            &(v, t),
            |b, &(v, t)| {
                b.iter(|| allocator.allocate(black_box(v), black_box(t), &limits));
            },
        );
    });
    group.finish();
}

fn direct_scan(c: &mut Criterion) {
    allocate(c, "DirectScan", DirectScan);
}

fn ratio_search(c: &mut Criterion) {
    allocate(c, "RatioSearch", RatioSearch);
}

criterion_group!(benches, direct_scan, ratio_search);
criterion_main!(benches);
