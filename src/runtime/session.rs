//! The application root.
//!
//! A [`Session`] owns the pattern (grid, tempo, scale, timbre), the
//! [`Scheduler`] and the single [`TickHandle`], and drives one
//! [`AudioBackend`]. Every user-facing operation lives here: grid edits,
//! transport, generation, mixing and bounce.
//!
//! The session is single-threaded. The front end calls [`Session::poll`] from
//! its event loop; edits made between polls are seen by the next tick.
//!
//! ```ignore
//! let graph = SignalGraph::new(48_000.0);
//! let mut session = Session::new(graph, SessionConfig::default().bpm(96).seed(7));
//! session.toggle_cell(7, 0, true);
//! session.start();
//! loop {
//!     for step in session.poll(Instant::now()) { /* highlight step.step */ }
//! }
//! ```

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_pcg::Pcg32;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    engine::{Pattern, Scheduler, StepEvent, TickHandle, DEFAULT_LOOKAHEAD, DEFAULT_TICK_INTERVAL},
    sequencing::{
        generate,
        grid::{ROWS, DEFAULT_COLUMNS},
        Generated, Genre, Grid, Scale, Tempo,
    },
    synth::{
        bounce,
        graph::{DEFAULT_MASTER_LEVEL, DEFAULT_WET_DRY_MIX},
        offline::BOUNCE_TAIL,
        AudioBackend, Bounce, OutputBus,
    },
    voices::{synthesize, Timbre},
    Error,
};

/// Downbeat probability used by the front end's randomize action.
pub const RANDOMIZE_STRONG: f64 = 0.35;
/// Probability for every other column.
pub const RANDOMIZE_OTHER: f64 = 0.14;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub tempo: Tempo,
    pub columns: usize,
    pub scale: Scale,
    pub timbre: Timbre,
    /// Seconds ahead of the audio clock the scheduler dispatches.
    pub lookahead: f64,
    pub tick_interval: Duration,
    pub master_level: f32,
    pub wet_dry_mix: f32,
    /// Seed for generation and randomize. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tempo: Tempo::default(),
            columns: DEFAULT_COLUMNS,
            scale: Scale::default(),
            timbre: Timbre::default(),
            lookahead: DEFAULT_LOOKAHEAD,
            tick_interval: DEFAULT_TICK_INTERVAL,
            master_level: DEFAULT_MASTER_LEVEL,
            wet_dry_mix: DEFAULT_WET_DRY_MIX,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn bpm(mut self, bpm: u32) -> Self {
        self.tempo = Tempo::new(bpm);
        self
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn timbre(mut self, timbre: Timbre) -> Self {
        self.timbre = timbre;
        self
    }

    pub fn lookahead(mut self, seconds: f64) -> Self {
        self.lookahead = seconds;
        self
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn master_level(mut self, level: f32) -> Self {
        self.master_level = level;
        self
    }

    pub fn wet_dry_mix(mut self, mix: f32) -> Self {
        self.wet_dry_mix = mix;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

pub struct Session<B: AudioBackend> {
    backend: B,
    grid: Grid,
    tempo: Tempo,
    scale: Scale,
    timbre: Timbre,
    scheduler: Scheduler,
    ticker: Option<TickHandle>,
    tick_interval: Duration,
    master_level: f32,
    wet_dry_mix: f32,
    rng: Pcg32,
}

impl<B: AudioBackend> Session<B> {
    pub fn new(mut backend: B, config: SessionConfig) -> Self {
        let master_level = config.master_level.clamp(0.0, 1.0);
        let wet_dry_mix = config.wet_dry_mix.clamp(0.0, 1.0);
        backend.set_master_level(master_level);
        backend.set_wet_dry_mix(wet_dry_mix);

        let seed = config.seed.unwrap_or_else(rand::random);
        debug!(seed, bpm = config.tempo.bpm(), "session created");

        Self {
            backend,
            grid: Grid::new(ROWS, config.columns),
            tempo: config.tempo,
            scale: config.scale,
            timbre: config.timbre,
            scheduler: Scheduler::new(config.lookahead),
            ticker: None,
            tick_interval: config.tick_interval,
            master_level,
            wet_dry_mix,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // Grid editing

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize, active: bool) {
        self.grid.set(row, col, active);
    }

    /// Flip a cell and return its new state.
    pub fn flip_cell(&mut self, row: usize, col: usize) -> bool {
        self.grid.flip(row, col)
    }

    pub fn resize_columns(&mut self, columns: usize) {
        self.grid.resize_columns(columns);
        self.scheduler.clamp_to_columns(self.grid.columns());
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn randomize(&mut self, strong: f64, other: f64) {
        self.grid.randomize(strong, other, &mut self.rng);
    }

    // Transport

    /// Start playback from step 0. A no-op while already playing.
    pub fn start(&mut self) -> bool {
        let now = self.backend.current_time();
        if !self.scheduler.start(now) {
            return false;
        }
        self.ticker = Some(TickHandle::new(self.tick_interval, Instant::now()));
        true
    }

    /// Stop playback. Voices already handed to the backend still sound.
    pub fn stop(&mut self) -> bool {
        self.ticker = None;
        self.scheduler.stop()
    }

    pub fn toggle_playback(&mut self) -> bool {
        if self.is_playing() {
            self.stop();
        } else {
            self.start();
        }
        self.is_playing()
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.is_playing()
    }

    /// Next step the scheduler will dispatch.
    pub fn current_step(&self) -> usize {
        self.scheduler.current_step()
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    /// Takes effect from the next undispatched step.
    pub fn set_tempo(&mut self, bpm: u32) {
        self.tempo = Tempo::new(bpm);
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Scale) {
        self.scale = scale;
    }

    pub fn timbre(&self) -> Timbre {
        self.timbre
    }

    pub fn set_timbre(&mut self, timbre: Timbre) {
        self.timbre = timbre;
    }

    /// Select a timbre by id, falling back to the default for unknown ids.
    pub fn set_timbre_by_id(&mut self, id: &str) {
        self.timbre = Timbre::from_id_or_default(id);
    }

    /// Run the scheduler once against the backend clock. Triggers go
    /// straight to the synthesis engine; step events are returned for the
    /// playhead.
    pub fn tick(&mut self) -> Vec<StepEvent> {
        let now = self.backend.current_time();
        let pattern = Pattern {
            grid: &self.grid,
            tempo: self.tempo,
            scale: self.scale,
            timbre: self.timbre,
        };
        let dispatch = self.scheduler.tick(now, pattern);

        for trigger in &dispatch.triggers {
            synthesize(trigger.timbre, trigger.frequency, trigger.time, &mut self.backend);
        }
        dispatch.steps
    }

    /// Tick if the tick handle is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<StepEvent> {
        let due = self.ticker.as_mut().is_some_and(|ticker| ticker.fire(now));
        if due {
            self.tick()
        } else {
            Vec::new()
        }
    }

    /// Time until the next tick is due, if playing.
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.as_ref().map(|ticker| ticker.remaining(now))
    }

    // Generation

    /// Replace the pattern with one generated for `genre`, adopt its tempo,
    /// scale and timbre, and restart playback from step 0.
    pub fn generate(&mut self, genre: Genre) -> Generated {
        let generated = generate(
            genre.profile(),
            self.grid.rows(),
            self.grid.columns(),
            &mut self.rng,
        );

        self.grid = generated.grid.clone();
        self.tempo = generated.tempo;
        self.scale = generated.scale;
        self.timbre = generated.timbre;

        self.stop();
        self.start();
        debug!(%genre, bpm = self.tempo.bpm(), "pattern generated");
        generated
    }

    /// Like [`generate`](Self::generate), falling back to the default genre
    /// for unknown ids.
    pub fn generate_by_id(&mut self, id: &str) -> Generated {
        let genre = id.parse().unwrap_or_else(|err: Error| {
            warn!(%err, "falling back to {}", Genre::default());
            Genre::default()
        });
        self.generate(genre)
    }

    // Mixing

    pub fn master_level(&self) -> f32 {
        self.master_level
    }

    pub fn set_master_level(&mut self, level: f32) {
        self.master_level = level.clamp(0.0, 1.0);
        self.backend.set_master_level(self.master_level);
    }

    pub fn wet_dry_mix(&self) -> f32 {
        self.wet_dry_mix
    }

    pub fn set_wet_dry_mix(&mut self, mix: f32) {
        self.wet_dry_mix = mix.clamp(0.0, 1.0);
        self.backend.set_wet_dry_mix(self.wet_dry_mix);
    }

    // Export

    /// Length of a bounce: one loop plus the release tail.
    pub fn bounce_length(&self) -> f64 {
        self.tempo.loop_duration(self.grid.columns()) + BOUNCE_TAIL
    }

    /// Render one pass of the loop offline with the current settings.
    pub fn bounce(&self) -> Bounce {
        let step = self.tempo.step_duration();
        let grid = &self.grid;
        let (scale, timbre) = (self.scale, self.timbre);

        bounce(
            self.bounce_length(),
            self.master_level,
            self.wet_dry_mix,
            |bus: &mut dyn OutputBus| {
                for col in 0..grid.columns() {
                    for row in grid.active_in_column(col) {
                        synthesize(timbre, scale.frequency(row), col as f64 * step, bus);
                    }
                }
            },
        )
    }
}

/// Playhead label, e.g. `"03 / 16"` for the third step.
pub fn step_label(step: usize, columns: usize) -> String {
    format!("{:02} / {:02}", step + 1, columns)
}
