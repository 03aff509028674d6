use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Layering
========

`a.add(b)` renders both nodes and sums them sample by sample:

    [A] ──┐
          ├──→ (+) ──→ out
    [B] ──┘

There are no weights. Each layer of a timbre carries its own envelope and
peak gain, so the sum is already balanced:

    chiptune     square f   @ 0.09
               + square 2f  @ 0.05

    fat saw      saw -8 ct  @ 0.05
               + saw  0 ct  @ 0.05
               + saw +8 ct  @ 0.05

Chains of `.add` nest to the left, `(a + b) + c`, and cost one scratch
buffer per pair.

Adding a constant is also how the ring modulator builds its `1 + sin`
modulator:

    OscNode::sine().with_frequency(1.5 * f).add(EnvNode::constant(1.0))
*/

pub struct Mix<A, B> {
    pub source_a: A,
    pub source_b: B,
    scratch: Vec<f32>,
}

impl<A, B> Mix<A, B> {
    pub fn new(source_a: A, source_b: B) -> Self {
        Self {
            source_a,
            source_b,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<A: GraphNode, B: GraphNode> GraphNode for Mix<A, B> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source_a.render_block(out, ctx);

        let layer = &mut self.scratch[..out.len()];
        layer.fill(0.0);
        self.source_b.render_block(layer, ctx);

        for (o, &b) in out.iter_mut().zip(layer.iter()) {
            *o += b;
        }
    }
}
