//! Pad voice - soft, chorused texture.
//!
//! Three pairs, one per detune (0, +7, -7 cents). Each pair is a sine on the
//! note with a 90 ms swell to 0.035, and a triangle an octave up with a
//! slower 120 ms swell to 0.018. Everything fades out over 650 ms.
//!
//! The triangles are not detuned, so the octave stays steady while the three
//! sines beat slowly against each other underneath it.

use crate::{
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode},
    synth::bus::OutputBus,
    voices::{play, STOP_PADDING},
};

const DURATION: f64 = 0.65;
const DETUNES: [f32; 3] = [0.0, 7.0, -7.0];

pub fn pad(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    for detune in DETUNES {
        let fundamental = OscNode::sine()
            .with_frequency(freq)
            .with_detune(detune)
            .amplify(EnvNode::swell(0.035, 0.09, DURATION));
        let octave = OscNode::triangle()
            .with_frequency(freq * 2.0)
            .amplify(EnvNode::swell(0.018, 0.12, DURATION));

        play(bus, start, DURATION + STOP_PADDING, freq, fundamental.add(octave));
    }
}
