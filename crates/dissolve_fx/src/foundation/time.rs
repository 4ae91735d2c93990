//! Frame timing utilities
//!
//! The reveal cycle is advanced by the host loop with a per-frame delta.
//! [`Timer`] produces that delta either from the wall clock or from a fixed
//! step, which keeps headless runs and tests deterministic.

use std::time::Instant;

/// Source of frame delta times
#[derive(Debug, Clone, Copy)]
enum Clock {
    /// Measure real elapsed time between updates
    Realtime { last_frame: Instant },
    /// Advance by a constant step each update
    Fixed { step: f32 },
}

/// Frame timer
#[derive(Debug, Clone)]
pub struct Timer {
    clock: Clock,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a wall-clock timer
    pub fn new() -> Self {
        Self::with_clock(Clock::Realtime { last_frame: Instant::now() })
    }

    /// Create a timer that advances by `1 / fps` seconds per update
    ///
    /// A zero frame rate is treated as 1 fps.
    pub fn fixed_rate(fps: u32) -> Self {
        let step = 1.0 / fps.max(1) as f32;
        Self::with_clock(Clock::Fixed { step })
    }

    fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame), returning the new delta
    pub fn update(&mut self) -> f32 {
        self.delta_time = match &mut self.clock {
            Clock::Realtime { last_frame } => {
                let now = Instant::now();
                let elapsed = now.duration_since(*last_frame).as_secs_f32();
                *last_frame = now;
                elapsed
            }
            Clock::Fixed { step } => *step,
        };
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check whether this timer runs on a fixed step
    pub fn is_fixed(&self) -> bool {
        matches!(self.clock, Clock::Fixed { .. })
    }
}
