//! Snare drum voice.
//!
//! Two events on the same start time: a 180 Hz triangle for the drum head
//! (0.3 decaying over 120 ms) and a 120 ms burst of enveloped white noise
//! for the wires. Pitch is fixed; the row only decides *when*.

use crate::{
    dsp::noise::NoiseColor,
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode},
    synth::bus::OutputBus,
    voices::{noise::burst, play, STOP_PADDING},
};

const BODY_FREQ: f32 = 180.0;
const DURATION: f64 = 0.12;

pub fn snare(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    let body = OscNode::triangle()
        .with_frequency(BODY_FREQ)
        .amplify(EnvNode::decay(0.3, DURATION));
    play(bus, start, DURATION + STOP_PADDING, freq, body);

    burst(NoiseColor::White, DURATION, freq, start, bus);
}
