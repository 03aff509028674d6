//! Benchmarks for whole-engine scenarios.

mod bounce;
mod timbres;

pub use bounce::bench_bounce;
pub use timbres::bench_timbres;
