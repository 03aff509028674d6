//! FM timbres.
//!
//! A sine modulator at `freq × ratio` bends the carrier's pitch by up to
//! `freq × ratio × index` Hz, and that deviation dies away exponentially over
//! the note. Bright and clangy at the attack, close to a pure sine by the end.

use crate::{
    graph::{envelope::EnvNode, extensions::NodeExt, fm::FmNode},
    synth::bus::OutputBus,
    voices::{play, STOP_PADDING},
};

const PEAK: f32 = 0.14;

fn fm_voice(freq: f32, ratio: f32, index: f32, duration: f64, start: f64, bus: &mut dyn OutputBus) {
    let node = FmNode::new(freq, ratio, index, duration)
        .amplify(EnvNode::percussive(PEAK, duration));
    play(bus, start, duration + STOP_PADDING, freq, node);
}

/// Bell-like lead: ratio 2, index 3, 180 ms.
pub fn fm(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    fm_voice(freq, 2.0, 3.0, 0.18, start, bus);
}

/// An octave down, ratio 1, index 1.5, 350 ms.
pub fn fm_bass(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    fm_voice(freq * 0.5, 1.0, 1.5, 0.35, start, bus);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::testing::RecordingBus;

    #[test]
    fn bass_plays_an_octave_down_for_longer() {
        let mut bus = RecordingBus::new();
        fm(440.0, 0.0, &mut bus);
        fm_bass(440.0, 0.0, &mut bus);

        assert_eq!(bus.events[0].frequency, 440.0);
        assert_eq!(bus.events[1].frequency, 220.0);
        assert!(bus.events[1].duration() > bus.events[0].duration());
    }
}
