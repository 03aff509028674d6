//! Kick drum voice.
//!
//! A sine whose pitch falls from twice the note to 0.3× over 150 ms, under
//! an instant-attack gain decaying from 0.8 over 400 ms. The pitch drop is
//! the "thump"; what remains after it is a low sub tone.
//!
//! Unlike most drum machines the kick follows the row pitch, so a column of
//! kicks plays a chord of thumps.

use crate::{
    dsp::Automation,
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode},
    synth::bus::OutputBus,
    voices::play,
};

pub fn kick(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    let pitch = Automation::constant(freq * 2.0)
        .set_value_at(0.0, freq * 2.0)
        .exponential_ramp_to(freq * 0.3, 0.15);

    let node = OscNode::sine()
        .with_frequency_curve(pitch)
        .amplify(EnvNode::decay(0.8, 0.4));
    play(bus, start, 0.45, freq, node);
}
