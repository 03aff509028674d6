//! Benchmarks for state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use gridsynth::dsp::filter::SVFilter;
use gridsynth::graph::node::RenderCtx;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let ctx = RenderCtx::from_freq(48_000.0, 440.0);

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        for (name, mut filter) in [
            ("lowpass", SVFilter::lowpass(900.0).with_q(1.0)),
            ("highpass", SVFilter::highpass(9_000.0).with_q(1.0)),
            ("bandpass", SVFilter::bandpass(1_000.0)),
        ] {
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }

        // Cutoff moving every sample, as in the bass sweep
        let mut filter = SVFilter::lowpass(900.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass_swept", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                for (i, sample) in buffer.iter_mut().enumerate() {
                    filter.set_cutoff(900.0 - i as f32);
                    *sample = filter.process(*sample, 48_000.0);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
