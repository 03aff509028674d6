//! Hi-hat voice (closed).
//!
//! 60 ms of white noise through a 9 kHz highpass, gain 0.18 decaying
//! exponentially. Everything below the cutoff is gone, so what is left is
//! the tight "tss".

use crate::{
    graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, noise::NoiseNode},
    synth::bus::OutputBus,
    voices::play,
};

const DURATION: f64 = 0.06;

pub fn hihat(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    let node = NoiseNode::white()
        .through(FilterNode::highpass(9_000.0).with_q(1.0))
        .amplify(EnvNode::decay(0.18, DURATION));
    play(bus, start, DURATION, freq, node);
}
