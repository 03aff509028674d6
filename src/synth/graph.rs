use tracing::trace;

use crate::{
    dsp::{reverb::Reverb, Smoothed},
    synth::{
        bus::{wet_dry_gains, AudioClock, MixerControls, OutputBus},
        voice::{ScheduledVoice, VoiceEvent},
    },
    MAX_BLOCK_SIZE,
};

/*
Signal Graph
============

The fixed routing every event plays into:

    voice ─┐
    voice ─┼──→ [master] ──┬──→ [dry gain] ─────────────┬──→ output
    voice ─┘               └──→ [reverb] ──→ [wet gain] ┘

Voices are summed into the master bus at their scheduled frames. Master,
dry and wet gains are smoothed so slider moves never click: master glides
with a 10 ms time constant, dry/wet with 50 ms.

The graph owns its own frame clock. `current_time()` is the time of the next
frame to be rendered; anything scheduled before it starts immediately.

While suspended the graph renders silence, its clock stops, and it reports
itself unavailable so new events are dropped at the source.

Voice storage is fixed at MAX_VOICES. A new voice arriving at capacity
replaces the one closest to its stop frame. Voices leaving the graph, whether
finished or replaced, go to a `retire` callback so the realtime bridge can
hand them back to the control thread instead of freeing them on the audio
thread.
*/

pub const DEFAULT_MASTER_LEVEL: f32 = 0.7;
pub const DEFAULT_WET_DRY_MIX: f32 = 0.2;

const MASTER_SMOOTHING: f32 = 0.01;
const MIX_SMOOTHING: f32 = 0.05;

/// Most voices sounding at once.
pub const MAX_VOICES: usize = 256;

pub struct SignalGraph {
    sample_rate: f32,
    frame: u64,
    suspended: bool,
    voices: Vec<ScheduledVoice>,
    reverb: Reverb,
    master: Smoothed,
    dry: Smoothed,
    wet: Smoothed,
    master_level: f32,
    wet_dry_mix: f32,
    bus_buffer: Vec<f32>,
    scratch: Vec<f32>,
}

impl SignalGraph {
    pub fn new(sample_rate: f32) -> Self {
        let (dry, wet) = wet_dry_gains(DEFAULT_WET_DRY_MIX);
        Self {
            sample_rate,
            frame: 0,
            suspended: false,
            voices: Vec::with_capacity(MAX_VOICES),
            reverb: Reverb::new(sample_rate),
            master: Smoothed::new(DEFAULT_MASTER_LEVEL, MASTER_SMOOTHING, sample_rate),
            dry: Smoothed::new(dry, MIX_SMOOTHING, sample_rate),
            wet: Smoothed::new(wet, MIX_SMOOTHING, sample_rate),
            master_level: DEFAULT_MASTER_LEVEL,
            wet_dry_mix: DEFAULT_WET_DRY_MIX,
            bus_buffer: vec![0.0; MAX_BLOCK_SIZE],
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Start from the given levels with no glide.
    pub fn with_levels(mut self, master_level: f32, wet_dry_mix: f32) -> Self {
        self.master_level = master_level.clamp(0.0, 1.0);
        self.wet_dry_mix = wet_dry_mix.clamp(0.0, 1.0);
        let (dry, wet) = wet_dry_gains(self.wet_dry_mix);
        self.master.snap(self.master_level);
        self.dry.snap(dry);
        self.wet.snap(wet);
        self
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn master_level(&self) -> f32 {
        self.master_level
    }

    pub fn wet_dry_mix(&self) -> f32 {
        self.wet_dry_mix
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// Pin `event` to the clock and add it to the voice list.
    ///
    /// Returns the voice that left the graph because of it: the one replaced
    /// at capacity, or the new voice itself while suspended.
    pub fn insert(&mut self, event: VoiceEvent) -> Option<ScheduledVoice> {
        let voice = ScheduledVoice::new(event, self.sample_rate, self.frame);
        if self.suspended {
            trace!("graph suspended, dropping event");
            return Some(voice);
        }
        if self.voices.len() < MAX_VOICES {
            self.voices.push(voice);
            return None;
        }

        trace!("voice limit reached, replacing the voice nearest its end");
        match self.voices.iter_mut().min_by_key(|v| v.stop_frame()) {
            Some(slot) => Some(std::mem::replace(slot, voice)),
            None => Some(voice),
        }
    }

    /// Render mono output, advancing the clock by `out.len()` frames.
    pub fn render(&mut self, out: &mut [f32]) {
        self.render_retiring(out, drop);
    }

    /// [`render`](Self::render), passing each finished voice to `retire`.
    pub fn render_retiring<F: FnMut(ScheduledVoice)>(&mut self, out: &mut [f32], mut retire: F) {
        if self.suspended {
            out.fill(0.0);
            return;
        }

        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_chunk(chunk, &mut retire);
        }
    }

    fn render_chunk<F: FnMut(ScheduledVoice)>(&mut self, out: &mut [f32], retire: &mut F) {
        let len = out.len();
        let block_start = self.frame;

        let bus = &mut self.bus_buffer[..len];
        bus.fill(0.0);
        for voice in &mut self.voices {
            voice.render_add(bus, &mut self.scratch, block_start, self.sample_rate);
        }

        for (o, &b) in out.iter_mut().zip(bus.iter()) {
            let master = b * self.master.next();
            let wet = self.reverb.process(master) * self.wet.next();
            *o = master * self.dry.next() + wet;
        }

        self.frame += len as u64;
        let now = self.frame;
        let mut i = 0;
        while i < self.voices.len() {
            if self.voices[i].is_finished(now) {
                retire(self.voices.swap_remove(i));
            } else {
                i += 1;
            }
        }
    }
}

impl OutputBus for SignalGraph {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn is_available(&self) -> bool {
        !self.suspended
    }

    fn schedule(&mut self, event: VoiceEvent) {
        self.insert(event);
    }
}

impl AudioClock for SignalGraph {
    fn current_time(&self) -> f64 {
        self.frame as f64 / self.sample_rate as f64
    }
}

impl MixerControls for SignalGraph {
    fn set_master_level(&mut self, level: f32) {
        self.master_level = level.clamp(0.0, 1.0);
        self.master.set_target(self.master_level);
    }

    fn set_wet_dry_mix(&mut self, mix: f32) {
        self.wet_dry_mix = mix.clamp(0.0, 1.0);
        let (dry, wet) = wet_dry_gains(self.wet_dry_mix);
        self.dry.set_target(dry);
        self.wet.set_target(wet);
    }
}
