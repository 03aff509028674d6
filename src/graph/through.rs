use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Chain
============

`a.through(b)` renders `a` into the block, then lets `b` process that block
in place:

    [source] ──→ [processor] ──→ out

Only nodes that read their input make sense as the second stage. In this
crate that is the filter node; generators such as oscillators and envelopes
overwrite the block and would discard the source.

The timbres that use it:

    hi-hat     white noise ──→ highpass 9 kHz
    bass       sawtooth f/2 ──→ lowpass sweeping 900 → 200 Hz
    explosion  white noise ──→ lowpass 500 Hz

Compare `amplify` (source × modulator, the VCA) and `add` (parallel layers
summed). A chain reads left to right in signal order:

    NoiseNode::white()
        .through(FilterNode::highpass(9_000.0).with_q(1.0))
        .amplify(EnvNode::decay(0.18, 0.06))
*/

pub struct Through<S, F> {
    source: S,
    filter: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.filter.render_block(out, ctx);
    }
}
