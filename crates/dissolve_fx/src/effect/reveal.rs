//! Reveal/conceal cycle
//!
//! ```text
//!            trigger                reaches 0
//!   Idle ─────────────▶ RevealingOut ─────────▶ RevealingIn
//!    ▲                       ▲                      │
//!    │ cancel (any state)    └──────────────────────┘
//!                                 reaches 1
//! ```
//!
//! The cycle owns no clock. The host frame loop calls [`RevealCycle::advance`]
//! with its delta time and pushes the returned value to the shader.

use crate::foundation::math::utils::{clamp01, lerp};

/// Shortest accepted leg duration in seconds
pub const MIN_LEG_DURATION: f32 = 1.0e-3;

/// Current leg of the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealPhase {
    /// Not animating
    #[default]
    Idle,
    /// Threshold falling from 1 to 0
    RevealingOut,
    /// Threshold rising from 0 to 1
    RevealingIn,
}

impl RevealPhase {
    /// Start and end threshold of the leg
    pub fn endpoints(self) -> Option<(f32, f32)> {
        match self {
            RevealPhase::Idle => None,
            RevealPhase::RevealingOut => Some((1.0, 0.0)),
            RevealPhase::RevealingIn => Some((0.0, 1.0)),
        }
    }

    /// Leg that follows this one
    pub fn next(self) -> Self {
        match self {
            RevealPhase::Idle => RevealPhase::Idle,
            RevealPhase::RevealingOut => RevealPhase::RevealingIn,
            RevealPhase::RevealingIn => RevealPhase::RevealingOut,
        }
    }
}

/// Perpetual back-and-forth threshold animation
#[derive(Debug, Clone, Default)]
pub struct RevealCycle {
    phase: RevealPhase,
    duration: f32,
    elapsed: f32,
    legs_completed: u64,
}

impl RevealCycle {
    /// Idle cycle
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a cycle with the given leg duration, returning the first value (1.0)
    ///
    /// Restarts from the top if a cycle is already running. Durations below
    /// [`MIN_LEG_DURATION`] (including NaN) are raised to it.
    pub fn start(&mut self, duration: f32) -> f32 {
        let duration = if duration >= MIN_LEG_DURATION && duration.is_finite() {
            duration
        } else {
            log::warn!("Reveal duration {} out of range, using {}", duration, MIN_LEG_DURATION);
            MIN_LEG_DURATION
        };

        self.phase = RevealPhase::RevealingOut;
        self.duration = duration;
        self.elapsed = 0.0;
        self.legs_completed = 0;
        log::info!("Reveal cycle started ({}s per leg)", duration);
        1.0
    }

    /// Stop the cycle; returns whether one was running
    pub fn cancel(&mut self) -> bool {
        let was_running = self.is_running();
        if was_running {
            log::info!("Reveal cycle cancelled after {} legs", self.legs_completed);
        }
        self.phase = RevealPhase::Idle;
        self.elapsed = 0.0;
        was_running
    }

    /// Advance by `delta_seconds` and return the interpolated threshold
    ///
    /// Returns `None` while idle. Time left over past the end of a leg carries
    /// into the following legs. Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, delta_seconds: f32) -> Option<f32> {
        if !self.is_running() {
            return None;
        }

        let delta = if delta_seconds.is_finite() { delta_seconds.max(0.0) } else { 0.0 };
        self.elapsed += delta;

        if self.elapsed >= self.duration {
            let remainder = self.elapsed.rem_euclid(self.duration);
            // Counted in f64 so parity survives huge deltas; the u64 cast saturates
            let legs = ((f64::from(self.elapsed) - f64::from(remainder)) / f64::from(self.duration))
                .round()
                .max(1.0);
            if legs.rem_euclid(2.0) >= 1.0 {
                self.phase = self.phase.next();
            }
            self.legs_completed = self.legs_completed.saturating_add(legs as u64);
            self.elapsed = remainder;
            log::debug!("Reveal leg complete, now {:?}", self.phase);
        }

        self.current_value()
    }

    /// Threshold at the current position, `None` while idle
    pub fn current_value(&self) -> Option<f32> {
        let (from, to) = self.phase.endpoints()?;
        Some(lerp(from, to, self.progress()))
    }

    /// Fraction of the current leg elapsed, in `[0, 1)`
    pub fn progress(&self) -> f32 {
        if self.is_running() {
            clamp01(self.elapsed / self.duration)
        } else {
            0.0
        }
    }

    /// Current leg
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Whether a cycle is running
    pub fn is_running(&self) -> bool {
        self.phase != RevealPhase::Idle
    }

    /// Leg duration of the running (or last) cycle
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Number of legs finished since the cycle started
    pub fn legs_completed(&self) -> u64 {
        self.legs_completed
    }
}
