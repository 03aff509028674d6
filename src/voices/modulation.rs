//! Amplitude and ring modulation.
//!
//! AM: a sawtooth whose envelope has an 8 Hz sine added to it. The LFO is
//! deeper (±0.5) than the envelope is tall (0.12), so the note stutters
//! rather than gently wobbling.
//!
//! Ring mod: a sawtooth multiplied by `1 + sin(2π · 1.5f · t)`. The 3:2
//! ratio puts sidebands at 0.5f and 2.5f, a hollow, slightly out-of-tune
//! metallic colour.

use crate::{
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode},
    synth::bus::OutputBus,
    voices::{play, STOP_PADDING},
};

const PEAK: f32 = 0.12;
const DURATION: f64 = 0.15;

pub fn am(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    let node = OscNode::sawtooth()
        .with_frequency(freq)
        .amplify(EnvNode::percussive(PEAK, DURATION).with_tremolo(8.0, 0.5));
    play(bus, start, DURATION + STOP_PADDING, freq, node);
}

pub fn ring_mod(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    let ring = OscNode::sine()
        .with_frequency(freq * 1.5)
        .add(EnvNode::constant(1.0));
    let node = OscNode::sawtooth()
        .with_frequency(freq)
        .amplify(ring)
        .amplify(EnvNode::percussive(PEAK, DURATION));
    play(bus, start, DURATION + STOP_PADDING, freq, node);
}
