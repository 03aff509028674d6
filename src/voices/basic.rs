//! Basic oscillator timbres.
//!
//! One raw waveform through the shared percussive envelope: 6 ms attack to
//! 0.14, exponential decay over 140 ms. The four waveforms cover the whole
//! range from pure (sine) to buzzy (sawtooth).

use crate::{
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode},
    synth::bus::OutputBus,
    voices::{play, STOP_PADDING},
};

const PEAK: f32 = 0.14;
const DURATION: f64 = 0.14;

fn basic(osc: OscNode, freq: f32, start: f64, bus: &mut dyn OutputBus) {
    let node = osc
        .with_frequency(freq)
        .amplify(EnvNode::percussive(PEAK, DURATION));
    play(bus, start, DURATION + STOP_PADDING, freq, node);
}

pub fn sine(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    basic(OscNode::sine(), freq, start, bus);
}

pub fn square(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    basic(OscNode::square(), freq, start, bus);
}

pub fn sawtooth(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    basic(OscNode::sawtooth(), freq, start, bus);
}

pub fn triangle(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    basic(OscNode::triangle(), freq, start, bus);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::testing::RecordingBus;

    #[test]
    fn one_event_of_150ms() {
        let mut bus = RecordingBus::new();
        square(440.0, 2.0, &mut bus);

        assert_eq!(bus.events.len(), 1);
        let event = &bus.events[0];
        assert_eq!(event.start_time, 2.0);
        assert!((event.duration() - 0.15).abs() < 1e-9);
        assert_eq!(event.frequency, 440.0);
    }
}
