//! Benchmarks for the Karplus-Strong delay line.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use gridsynth::dsp::delay::FeedbackDelay;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");
    let mut rng = Pcg32::seed_from_u64(0);

    for &size in BLOCK_SIZES {
        let mut line = FeedbackDelay::new(FeedbackDelay::length_for(220.0, 48_000.0));
        let mut buffer = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("pluck_220hz", size), &size, |b, _| {
            b.iter(|| {
                line.pluck(&mut rng);
                line.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
