//! Cost of one trigger per timbre: scheduling it on the signal graph and
//! rendering the first 512 samples through master, dry and reverb.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use gridsynth::{
    synth::SignalGraph,
    voices::{synthesize, Timbre},
};

pub fn bench_timbres(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/timbres");
    let mut buffer = vec![0.0f32; 512];

    for &timbre in Timbre::ALL {
        group.bench_with_input(BenchmarkId::new(timbre.id(), 512), &timbre, |b, &timbre| {
            b.iter(|| {
                let mut graph = SignalGraph::new(48_000.0);
                synthesize(timbre, black_box(220.0), 0.0, &mut graph);
                graph.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
