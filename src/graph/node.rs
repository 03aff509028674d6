/// Context passed to graph nodes during rendering
///
/// Contains information about what to render:
/// - sample_rate: Audio sample rate (e.g., 44100.0)
/// - frequency: Pitch of the event being rendered (Hz)
/// - time: Seconds since the event started, at the first sample of the block
///
/// Time is local to the event. A node built from [`Automation`] curves reads
/// its parameters at `ctx.sample_time(i)`, so the same node renders the same
/// way no matter when, or on which clock, the event was scheduled.
///
/// [`Automation`]: crate::dsp::Automation
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub frequency: f32,
    pub time: f64,
}

impl RenderCtx {
    /// Context at the very start of an event.
    pub fn from_freq(sample_rate: f32, frequency: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            time: 0.0,
        }
    }

    /// Same event, `time` seconds in.
    pub fn at(self, time: f64) -> Self {
        Self { time, ..self }
    }

    /// Event-local time of sample `index` in the current block.
    #[inline]
    pub fn sample_time(&self, index: usize) -> f64 {
        self.time + index as f64 / self.sample_rate as f64
    }
}

/// Core trait for audio processing graph nodes
///
/// A node renders consecutive blocks of one event. The caller advances
/// `ctx.time` between calls; nodes keep their own running state (phase,
/// filter memory) and must not assume a fixed block size.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_time_counts_from_block_start() {
        let ctx = RenderCtx::from_freq(100.0, 440.0).at(0.5);
        assert_eq!(ctx.sample_time(0), 0.5);
        assert!((ctx.sample_time(10) - 0.6).abs() < 1e-12);
    }
}
