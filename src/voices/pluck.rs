//! Plucked string (Karplus-Strong).
//!
//! No oscillator at all: a burst of noise one period long circulates through
//! an averaging delay line and decays into a string-like tone. There is no
//! envelope either; the loop does its own decay, and the event simply plays
//! for one period plus 0.9 s of tail at a constant 0.38.

use crate::{
    graph::{extensions::NodeExt, pluck::PluckNode},
    synth::bus::OutputBus,
    voices::play,
};

const GAIN: f32 = 0.38;
const TAIL: f64 = 0.9;

pub fn karplus(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    let sample_rate = bus.sample_rate();
    let string = PluckNode::new(freq, sample_rate);

    let frames = string.delay_len() as f64 + (sample_rate as f64 * TAIL).floor();
    let duration = frames / sample_rate as f64;

    play(bus, start, duration, freq, string.gain(GAIN));
}
