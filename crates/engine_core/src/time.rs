//! Time management for the simulation loop.
//!
//! The simulation advances in fixed ticks: orbit speeds are expressed in radians per
//! tick, so a frame of arbitrary length is converted into a whole number of ticks by
//! an accumulator. Frames can be fed from the wall clock (`update`) or from an
//! explicit delta (`advance`) so headless runs and tests stay reproducible.

use std::time::{Duration, Instant};

/// Manages frame timing and the fixed-tick accumulator.
#[derive(Debug)]
pub struct Time {
    /// Wall-clock instant of the last `update` call.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total simulated time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Fixed ticks consumed since start.
    tick_count: u64,
    /// Fixed timestep (default 60 Hz).
    fixed_timestep: Duration,
    /// Accumulated time not yet consumed by fixed ticks.
    accumulator: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager running at 60 ticks per second.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            tick_count: 0,
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
            accumulator: Duration::ZERO,
        }
    }

    /// Create a time manager with the given tick rate in Hz.
    pub fn with_tick_rate(hz: f64) -> Self {
        let mut time = Self::new();
        time.set_fixed_rate(hz);
        time
    }

    /// Start a new frame from the wall clock.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta);
    }

    /// Start a new frame of an explicit length.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        self.accumulator += delta;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Fixed ticks consumed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }

    /// Ticks per second.
    pub fn tick_rate(&self) -> f64 {
        1.0 / self.fixed_timestep.as_secs_f64()
    }

    /// Check if a fixed tick should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            self.tick_count += 1;
            true
        } else {
            false
        }
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }

    /// Set the fixed timestep rate in Hz. Non-positive or non-finite rates are ignored.
    pub fn set_fixed_rate(&mut self, hz: f64) {
        if hz.is_finite() && hz > 0.0 {
            self.fixed_timestep = Duration::from_secs_f64(1.0 / hz);
        }
    }
}

/// Format a play duration for display: `"{h}h {m}m"` once an hour has passed,
/// `"{m}m {s}s"` before that.
pub fn format_playtime(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, seconds)
    }
}
