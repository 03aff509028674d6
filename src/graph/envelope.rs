use crate::{
    dsp::{envelope, oscillator::OscillatorBlock, Automation},
    graph::node::{GraphNode, RenderCtx},
};

/*
Envelope Node
=============

Renders a gain curve as a signal, so it can be multiplied into a source with
`.amplify(...)`:

    OscNode::square().amplify(EnvNode::percussive(0.14, 0.14))

The node does not process its input; it overwrites the block with the curve
value at each sample's event-local time.

Tremolo
-------
An optional sine LFO is *added* to the curve:

    gain(t) = curve(t) + depth · sin(2π · rate · t)

With depth 0.5 at 8 Hz on a 0.12 peak envelope the gain swings negative
during the dips, which flips the phase of the source for part of each LFO
cycle. That wobble is the point of the AM timbre, so the sum is not clamped.
*/

pub struct EnvNode {
    curve: Automation,
    tremolo: Option<Tremolo>,
}

struct Tremolo {
    lfo: OscillatorBlock,
    rate: f32,
    depth: f32,
}

impl EnvNode {
    pub fn curve(curve: Automation) -> Self {
        Self {
            curve,
            tremolo: None,
        }
    }

    pub fn constant(gain: f32) -> Self {
        Self::curve(Automation::constant(gain))
    }

    /// See [`envelope::percussive`].
    pub fn percussive(peak: f32, duration: f64) -> Self {
        Self::curve(envelope::percussive(peak, duration))
    }

    /// See [`envelope::decay`].
    pub fn decay(peak: f32, duration: f64) -> Self {
        Self::curve(envelope::decay(peak, duration))
    }

    /// See [`envelope::swell`].
    pub fn swell(peak: f32, attack: f64, duration: f64) -> Self {
        Self::curve(envelope::swell(peak, attack, duration))
    }

    pub fn with_tremolo(mut self, rate: f32, depth: f32) -> Self {
        self.tremolo = Some(Tremolo {
            lfo: OscillatorBlock::sine(),
            rate,
            depth,
        });
        self
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if self.curve.is_constant() {
            out.fill(self.curve.value_at(0.0));
        } else {
            for (i, sample) in out.iter_mut().enumerate() {
                *sample = self.curve.value_at(ctx.sample_time(i));
            }
        }

        if let Some(tremolo) = &mut self.tremolo {
            for sample in out.iter_mut() {
                *sample += tremolo.depth * tremolo.lfo.next_sample(tremolo.rate, ctx.sample_rate);
            }
        }
    }
}
