//! Bass voice.
//!
//! A sawtooth an octave below the note, through a lowpass whose cutoff
//! closes from 900 Hz to 200 Hz over the 280 ms note. The note opens with
//! some bite and darkens into a round thud.
//!
//! # Variations
//!
//! - Higher start cutoff = more aggressive, "acid" bass
//! - Square instead of saw = hollower, woodier

use crate::{
    dsp::Automation,
    graph::{envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode},
    synth::bus::OutputBus,
    voices::{play, STOP_PADDING},
};

const PEAK: f32 = 0.28;
const DURATION: f64 = 0.28;

pub fn bass(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    let cutoff = Automation::constant(900.0)
        .set_value_at(0.0, 900.0)
        .exponential_ramp_to(200.0, DURATION);

    let node = OscNode::sawtooth()
        .with_frequency(freq * 0.5)
        .through(FilterNode::lowpass_curve(cutoff).with_q(1.0))
        .amplify(EnvNode::percussive(PEAK, DURATION));
    play(bus, start, DURATION + STOP_PADDING, freq, node);
}
