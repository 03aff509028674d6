//! Noise timbres: white or pink hiss through the shared percussive envelope.
//! The note pitch is ignored.

use crate::{
    dsp::noise::NoiseColor,
    graph::{envelope::EnvNode, extensions::NodeExt, noise::NoiseNode},
    synth::bus::OutputBus,
    voices::play,
};

pub(crate) const PEAK: f32 = 0.14;

/// Enveloped noise burst of `duration` seconds.
pub(crate) fn burst(color: NoiseColor, duration: f64, freq: f32, start: f64, bus: &mut dyn OutputBus) {
    let node = NoiseNode::new(color).amplify(EnvNode::percussive(PEAK, duration));
    play(bus, start, duration, freq, node);
}

pub fn white(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    burst(NoiseColor::White, 0.14, freq, start, bus);
}

pub fn pink(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    burst(NoiseColor::Pink, 0.14, freq, start, bus);
}
