use crate::dsp::{oscillator::OscillatorBlock, Automation};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Oscillator Node
===============

The pitched source behind most timbres. Four shapes, naive (no band
limiting) to keep the 8-bit edge of the square and saw:

    sine       kick body, FM carrier and modulator, bell partials
    triangle   soft lead, the "organ" partials
    square     chiptune lead, pulse, snare body
    sawtooth   bass, fat saw stack, laser

Pitch
-----
By default an oscillator plays the event's pitch (ctx.frequency). Two
overrides exist:

  with_frequency(hz)        a fixed pitch, e.g. 180 Hz for the snare body
  with_frequency_curve(c)   a pitch that moves over the event, e.g. the kick's
                            drop from 2f to 0.3f or the laser's 4f → f/2 sweep

Detune is applied on top of either, as 2^(cents/1200):

  OscNode::sawtooth().with_detune(-8.0)
  OscNode::square().with_frequency(freq * 2.0)
  OscNode::sine().with_frequency_curve(
      Automation::constant(880.0).exponential_ramp_to(110.0, 0.15),
  )
*/

pub struct OscNode {
    osc: OscillatorBlock,
    /// Pitch override. `None` follows ctx.frequency.
    frequency: Option<Automation>,
    /// Detune in cents. 100 cents = 1 semitone.
    detune_cents: f32,
}

impl OscNode {
    fn new(osc: OscillatorBlock) -> Self {
        Self {
            osc,
            frequency: None,
            detune_cents: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorBlock::sine())
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorBlock::sawtooth())
    }

    pub fn square() -> Self {
        Self::new(OscillatorBlock::square())
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorBlock::triangle())
    }

    /// Play a fixed frequency, ignoring the event pitch.
    pub fn with_frequency(self, freq: f32) -> Self {
        self.with_frequency_curve(Automation::constant(freq))
    }

    /// Play a frequency that follows `curve` over the event.
    pub fn with_frequency_curve(mut self, curve: Automation) -> Self {
        self.frequency = Some(curve);
        self
    }

    /// Offset the pitch by `cents` (100 per semitone). The fat saw stacks
    /// three saws at -8, 0 and +8 cents.
    pub fn with_detune(mut self, cents: f32) -> Self {
        self.detune_cents = cents;
        self
    }

    #[inline]
    fn detune_ratio(&self) -> f32 {
        if self.detune_cents != 0.0 {
            2.0_f32.powf(self.detune_cents / 1200.0)
        } else {
            1.0
        }
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let ratio = self.detune_ratio();

        match &self.frequency {
            Some(curve) if !curve.is_constant() => {
                for (i, sample) in out.iter_mut().enumerate() {
                    let freq = curve.value_at(ctx.sample_time(i)) * ratio;
                    *sample = self.osc.next_sample(freq, ctx.sample_rate);
                }
            }
            Some(curve) => {
                let freq = curve.value_at(0.0) * ratio;
                self.osc.render(out, freq, ctx.sample_rate);
            }
            None => self.osc.render(out, ctx.frequency * ratio, ctx.sample_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use super::*;

    #[test]
    fn follows_event_pitch() {
        let ctx = RenderCtx::from_freq(44_100.0, 440.0);
        let mut osc = OscNode::sine();
        let mut buffer = vec![0.0f32; 64];
        osc.render_block(&mut buffer, &ctx);

        for (n, &sample) in buffer.iter().enumerate().step_by(7) {
            let expected = (TAU * 440.0 * n as f32 / 44_100.0).sin();
            assert!((sample - expected).abs() < 1e-4, "n={n}: {sample} vs {expected}");
        }
    }

    #[test]
    fn fixed_frequency_ignores_event_pitch() {
        let ctx = RenderCtx::from_freq(100.0, 440.0);
        let mut osc = OscNode::square().with_frequency(1.0);
        let mut buffer = vec![0.0f32; 100];
        osc.render_block(&mut buffer, &ctx);

        // One full 1 Hz cycle at 100 Hz: half high, half low
        let high = buffer.iter().filter(|&&s| s > 0.0).count();
        assert!((49..=51).contains(&high), "high for {high} samples");
    }

    #[test]
    fn detune_raises_pitch_by_cents() {
        let sample_rate = 1_000.0;
        let ctx = RenderCtx::from_freq(sample_rate, 10.0);

        let count_rising = |buffer: &[f32]| {
            buffer
                .windows(2)
                .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
                .count()
        };

        let mut plain = OscNode::sine();
        let mut octave_up = OscNode::sine().with_detune(1200.0);
        let mut a = vec![0.0f32; 1000];
        let mut b = vec![0.0f32; 1000];
        plain.render_block(&mut a, &ctx);
        octave_up.render_block(&mut b, &ctx);

        let (ca, cb) = (count_rising(&a), count_rising(&b));
        let ratio = cb as f32 / ca as f32;
        assert!((ratio - 2.0).abs() < 0.25, "plain={ca}, detuned={cb}");
    }

    #[test]
    fn frequency_curve_sweeps_across_blocks() {
        let sample_rate = 8_000.0;
        let curve = Automation::constant(2_000.0)
            .set_value_at(0.0, 2_000.0)
            .exponential_ramp_to(20.0, 0.5);
        let mut osc = OscNode::sawtooth().with_frequency_curve(curve);

        let mut early = vec![0.0f32; 400];
        let mut late = vec![0.0f32; 400];
        let ctx = RenderCtx::from_freq(sample_rate, 440.0);
        osc.render_block(&mut early, &ctx);
        osc.render_block(&mut late, &ctx.at(0.45));

        // A falling saw changes less per sample as the pitch drops
        let slope = |b: &[f32]| {
            b.windows(2)
                .map(|w| (w[1] - w[0]).abs())
                .filter(|d| *d < 1.0)
                .sum::<f32>()
        };
        assert!(slope(&late) < slope(&early));
    }
}
