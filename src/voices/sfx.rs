//! Game sound effects.
//!
//! - laser: a sawtooth diving from 4f to f/2 over 220 ms
//! - coin: the classic pickup arpeggio, squares at f, 1.5f and 2f fired
//!   40 ms apart, 90 ms each
//! - explosion: 550 ms of white noise, 0.4 decaying, through a 500 Hz
//!   lowpass. Pitch is ignored.

use crate::{
    dsp::Automation,
    graph::{
        envelope::EnvNode, extensions::NodeExt, filter::FilterNode, noise::NoiseNode,
        oscillator::OscNode,
    },
    synth::bus::OutputBus,
    voices::{play, STOP_PADDING},
};

const LASER_DURATION: f64 = 0.22;
const COIN_STEPS: [f32; 3] = [1.0, 1.5, 2.0];
const COIN_SPACING: f64 = 0.04;
const COIN_DURATION: f64 = 0.09;
const EXPLOSION_DURATION: f64 = 0.55;

pub fn laser(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    let sweep = Automation::constant(freq * 4.0)
        .set_value_at(0.0, freq * 4.0)
        .exponential_ramp_to(freq * 0.5, LASER_DURATION);

    let node = OscNode::sawtooth()
        .with_frequency_curve(sweep)
        .amplify(EnvNode::percussive(0.18, LASER_DURATION));
    play(bus, start, LASER_DURATION + STOP_PADDING, freq, node);
}

pub fn coin(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    for (i, ratio) in COIN_STEPS.into_iter().enumerate() {
        let at = start + i as f64 * COIN_SPACING;
        let node = OscNode::square()
            .with_frequency(freq * ratio)
            .amplify(EnvNode::percussive(0.14, COIN_DURATION));
        play(bus, at, COIN_DURATION + STOP_PADDING, freq * ratio, node);
    }
}

pub fn explosion(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    let node = NoiseNode::white()
        .amplify(EnvNode::decay(0.4, EXPLOSION_DURATION))
        .through(FilterNode::lowpass(500.0).with_q(1.0));
    play(bus, start, EXPLOSION_DURATION, freq, node);
}
