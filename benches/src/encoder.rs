use std::hint::black_box;

use lockbox::prelude::*;
use lockbox_driver::ramp::RampEncoder;
use rand::Rng;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const TEST_SIZES: &[usize] = &[2, 5, 9];

fn random_breakpoints(len: usize) -> Breakpoints {
    let mut rng = rand::rng();
    let mut time = 0.;
    (0..len)
        .map(|i| {
            if i > 0 {
                time += rng.random_range(1e-4..1e-2);
            }
            (time, rng.random_range(-1.0..0.99))
        })
        .collect()
}

fn encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("lockbox/encoder/encode");
    let encoder = RampEncoder::new(RampConfig::default());

    TEST_SIZES.iter().for_each(|&size| {
        group.bench_with_input(
            BenchmarkId::new("RampEncoder", size),
            &random_breakpoints(size),
            |b, breakpoints| {
                b.iter(|| encoder.encode(black_box(breakpoints)));
            },
        );
    });
    group.finish();
}

fn send(c: &mut Criterion) {
    let mut group = c.benchmark_group("lockbox/encoder/send");

    TEST_SIZES.iter().for_each(|&size| {
        group.bench_with_input(
            BenchmarkId::new("RampFunction", size),
            &random_breakpoints(size),
            |b, breakpoints| {
                let mut controller = Controller::builder()
                    .open(RegisterMemory::new())
                    .expect("default device is valid");
                b.iter(|| {
                    controller.send(RampFunction::new(black_box(breakpoints.clone())))
                });
            },
        );
    });
    group.finish();
}

criterion_group!(benches, encode, send);
criterion_main!(benches);
