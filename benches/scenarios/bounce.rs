//! Offline bounce of a full generated loop.

use std::hint::black_box;

use criterion::Criterion;
use gridsynth::{
    runtime::{Session, SessionConfig},
    sequencing::Genre,
    synth::{offline::BOUNCE_SAMPLE_RATE, SignalGraph},
};

pub fn bench_bounce(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/bounce");
    group.sample_size(10);

    for genre in [Genre::Action, Genre::Ambient, Genre::Boss] {
        let mut session = Session::new(
            SignalGraph::new(BOUNCE_SAMPLE_RATE),
            SessionConfig::default().seed(7),
        );
        session.generate(genre);

        group.bench_function(genre.id(), |b| b.iter(|| black_box(session.bounce())));
    }

    group.finish();
}
