use crate::graph::node::{GraphNode, RenderCtx};

/// One synthesized event, ready to be placed on a bus.
///
/// Times are absolute seconds on the bus clock. The node itself only ever
/// sees event-local time, starting at 0.0 on its first rendered sample.
pub struct VoiceEvent {
    pub start_time: f64,
    pub stop_time: f64,
    pub frequency: f32,
    pub node: Box<dyn GraphNode>,
}

impl VoiceEvent {
    pub fn new(start_time: f64, duration: f64, frequency: f32, node: Box<dyn GraphNode>) -> Self {
        Self {
            start_time,
            stop_time: start_time + duration.max(0.0),
            frequency,
            node,
        }
    }

    pub fn duration(&self) -> f64 {
        self.stop_time - self.start_time
    }
}

/// A [`VoiceEvent`] pinned to sample frames.
pub struct ScheduledVoice {
    node: Box<dyn GraphNode>,
    frequency: f32,
    start_frame: u64,
    stop_frame: u64,
}

impl ScheduledVoice {
    /// Convert `event` to frames. A start already in the past is moved to
    /// `now_frame`, keeping the event's length.
    pub fn new(event: VoiceEvent, sample_rate: f32, now_frame: u64) -> Self {
        let sr = sample_rate as f64;
        let start = (event.start_time * sr).round().max(0.0) as u64;
        let stop = ((event.stop_time * sr).round().max(0.0) as u64).max(start);
        let shift = now_frame.saturating_sub(start);

        Self {
            node: event.node,
            frequency: event.frequency,
            start_frame: start + shift,
            stop_frame: stop + shift,
        }
    }

    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }

    pub fn stop_frame(&self) -> u64 {
        self.stop_frame
    }

    /// Nothing left to render once the block starting at `frame` begins.
    pub fn is_finished(&self, frame: u64) -> bool {
        frame >= self.stop_frame
    }

    /// Add this voice's share of the block `[block_start, block_start + out.len())`
    /// into `out`. `scratch` must be at least as long as `out`.
    pub fn render_add(
        &mut self,
        out: &mut [f32],
        scratch: &mut [f32],
        block_start: u64,
        sample_rate: f32,
    ) {
        let block_end = block_start + out.len() as u64;
        let from = self.start_frame.max(block_start);
        let to = self.stop_frame.min(block_end);
        if from >= to {
            return;
        }

        let offset = (from - block_start) as usize;
        let len = (to - from) as usize;
        let ctx = RenderCtx {
            sample_rate,
            frequency: self.frequency,
            time: (from - self.start_frame) as f64 / sample_rate as f64,
        };

        let scratch = &mut scratch[..len];
        scratch.fill(0.0);
        self.node.render_block(scratch, &ctx);

        for (o, s) in out[offset..offset + len].iter_mut().zip(scratch.iter()) {
            *o += *s;
        }
    }
}
