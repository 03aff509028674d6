//! Additive timbres: a few oscillators stacked on one note.
//!
//! Each layer has its own percussive envelope and they are summed, not
//! crossfaded, so the peaks add up.
//!
//! - chiptune: square at 0.09 plus a square an octave up at 0.05
//! - fat saw: three saws at -8, 0 and +8 cents, 0.05 each
//! - super square: three squares at 0, +5 and -5 cents, 0.05 each
//!
//! The detuned stacks beat against each other a few times per second, which
//! reads as width rather than as three separate notes.

use crate::{
    graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode},
    synth::bus::OutputBus,
    voices::{play, STOP_PADDING},
};

const DURATION: f64 = 0.14;
const STACK_PEAK: f32 = 0.05;

pub fn chiptune(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    let root = OscNode::square()
        .with_frequency(freq)
        .amplify(EnvNode::percussive(0.09, DURATION));
    let octave = OscNode::square()
        .with_frequency(freq * 2.0)
        .amplify(EnvNode::percussive(0.05, DURATION));

    play(bus, start, DURATION + STOP_PADDING, freq, root.add(octave));
}

fn detuned_stack(
    make: fn() -> OscNode,
    cents: [f32; 3],
    freq: f32,
    start: f64,
    bus: &mut dyn OutputBus,
) {
    let layer = |detune: f32| {
        make()
            .with_frequency(freq)
            .with_detune(detune)
            .amplify(EnvNode::percussive(STACK_PEAK, DURATION))
    };
    let node = layer(cents[0]).add(layer(cents[1])).add(layer(cents[2]));
    play(bus, start, DURATION + STOP_PADDING, freq, node);
}

pub fn fat_saw(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    detuned_stack(OscNode::sawtooth, [-8.0, 0.0, 8.0], freq, start, bus);
}

pub fn super_square(freq: f32, start: f64, bus: &mut dyn OutputBus) {
    detuned_stack(OscNode::square, [0.0, 5.0, -5.0], freq, start, bus);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::offline::bounce;

    #[test]
    fn stack_peaks_near_the_sum_of_layers() {
        let out = bounce(0.2, 1.0, 0.0, |bus| super_square(220.0, 0.0, bus));
        // Three in-phase squares at 0.05 each
        assert!(out.peak() > 0.14 && out.peak() <= 0.15 + 1e-4, "peak {}", out.peak());
    }

    #[test]
    fn chiptune_layers_sum() {
        let out = bounce(0.2, 1.0, 0.0, |bus| chiptune(220.0, 0.0, bus));
        assert!(out.peak() > 0.12 && out.peak() <= 0.14 + 1e-4, "peak {}", out.peak());
    }
}
