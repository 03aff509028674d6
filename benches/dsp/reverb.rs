//! Benchmarks for the reverb on the wet path.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use gridsynth::dsp::reverb::Reverb;

use crate::BLOCK_SIZES;

pub fn bench_reverb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/reverb");

    for &size in BLOCK_SIZES {
        let mut reverb = Reverb::new(48_000.0);
        let input: Vec<f32> = (0..size).map(|i| if i % 64 == 0 { 0.5 } else { 0.0 }).collect();
        let mut buffer = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("process", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(input.iter()) {
                    *out = reverb.process(black_box(x));
                }
            })
        });
    }

    group.finish();
}
