//! Time-stamped parameter automation.

/*
Parameter Automation
====================

A synthesized event is computed *ahead* of when it sounds: the scheduler
hands the engine a start time that can be up to a lookahead window in the
future. Nothing in a voice may therefore depend on "now". Instead every
moving parameter (gain, pitch, filter cutoff, FM depth) is described as a
curve of time-stamped breakpoints, measured in seconds from the event start.

Vocabulary
----------

  breakpoint   (time, value, ramp) - the curve passes through `value` at
               `time`. The ramp says how it gets there from the previous
               breakpoint.

  set          Jump. The value holds until `time`, then becomes `value`.

  linear       Straight line from the previous breakpoint.

  exponential  Constant-ratio glide from the previous breakpoint:

                 v(t) = v0 · (v1 / v0) ^ ((t - t0) / (t1 - t0))

               This is how acoustic sounds decay, and how pitch sweeps
               sound "even" to the ear. Both ends must be non-zero and share
               a sign; that is why envelopes start at a small floor instead
               of 0.0.

Example: the shared percussive envelope

    value
     peak ┤  ╱╲
          │ ╱  ╲
          │╱    ╲_
    0.001 ┤        ‾‾──___
          └──┬──────────────┬──→ time
           6 ms          duration

    Automation::constant(0.001)
        .set_value_at(0.0, 0.001)
        .linear_ramp_to(peak, 0.006)
        .exponential_ramp_to(0.0001, duration)

Evaluating
----------

`value_at(t)` walks the breakpoints (there are rarely more than four):
  - before the first breakpoint the initial value holds
  - between two breakpoints the later one's ramp decides the shape
  - after the last breakpoint its value holds forever
*/

#[derive(Debug, Clone, Copy, PartialEq)]
enum Ramp {
    Set,
    Linear,
    Exponential,
}

#[derive(Debug, Clone, Copy)]
struct Breakpoint {
    time: f64,
    value: f32,
    ramp: Ramp,
}

#[derive(Debug, Clone)]
pub struct Automation {
    initial: f32,
    breakpoints: Vec<Breakpoint>,
}

impl Automation {
    /// A curve that never moves.
    pub fn constant(value: f32) -> Self {
        Self {
            initial: value,
            breakpoints: Vec::new(),
        }
    }

    pub fn set_value_at(self, time: f64, value: f32) -> Self {
        self.push(time, value, Ramp::Set)
    }

    pub fn linear_ramp_to(self, value: f32, time: f64) -> Self {
        self.push(time, value, Ramp::Linear)
    }

    pub fn exponential_ramp_to(self, value: f32, time: f64) -> Self {
        self.push(time, value, Ramp::Exponential)
    }

    fn push(mut self, time: f64, value: f32, ramp: Ramp) -> Self {
        let time = time.max(0.0);
        let index = self
            .breakpoints
            .iter()
            .position(|bp| bp.time > time)
            .unwrap_or(self.breakpoints.len());
        self.breakpoints.insert(index, Breakpoint { time, value, ramp });
        self
    }

    /// Curve value `time` seconds after the event start.
    pub fn value_at(&self, time: f64) -> f32 {
        let mut prev_time = 0.0;
        let mut prev_value = self.initial;

        for bp in &self.breakpoints {
            if bp.time <= time {
                prev_time = bp.time;
                prev_value = bp.value;
                continue;
            }

            let progress = ((time - prev_time) / (bp.time - prev_time)) as f32;
            return match bp.ramp {
                Ramp::Set => prev_value,
                Ramp::Linear => prev_value + (bp.value - prev_value) * progress,
                Ramp::Exponential if prev_value * bp.value > 0.0 => {
                    prev_value * (bp.value / prev_value).powf(progress)
                }
                // Undefined ratio: hold until the breakpoint arrives.
                Ramp::Exponential => prev_value,
            };
        }

        prev_value
    }

    /// Time of the last breakpoint (0.0 for a constant curve).
    pub fn end_time(&self) -> f64 {
        self.breakpoints.last().map_or(0.0, |bp| bp.time)
    }

    pub fn is_constant(&self) -> bool {
        self.breakpoints.is_empty()
    }
}

/// One-pole glide toward a target value.
///
/// Used for user-facing mixer controls so a slider move never clicks.
/// `time_constant` is the time to cover ~63% of the distance.
#[derive(Debug, Clone, Copy)]
pub struct Smoothed {
    current: f32,
    target: f32,
    coeff: f32,
}

impl Smoothed {
    pub fn new(value: f32, time_constant: f32, sample_rate: f32) -> Self {
        let coeff = if time_constant <= 0.0 {
            0.0
        } else {
            (-1.0 / (time_constant * sample_rate)).exp()
        };
        Self {
            current: value,
            target: value,
            coeff,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump straight to `value`, skipping the glide.
    pub fn snap(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    #[inline]
    pub fn next(&mut self) -> f32 {
        self.current = self.target + (self.current - self.target) * self.coeff;
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}
