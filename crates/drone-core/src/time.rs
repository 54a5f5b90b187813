//! Frame timing for the drone controller
//!
//! Handles delta-time sanitizing and the fixed-step accumulator used by hosts
//! that drive the controller from a variable-rate loop.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Smallest delta time the controller will integrate with (seconds)
pub const MIN_DELTA_TIME: f32 = 1.0e-4;

/// Clamp a raw delta time to a usable positive value.
///
/// Zero, negative and non-finite deltas become [`MIN_DELTA_TIME`] so a bad
/// frame never poisons persistent timers.
pub fn sanitize_delta(raw_delta: f32) -> f32 {
    if raw_delta.is_finite() && raw_delta >= MIN_DELTA_TIME {
        return raw_delta;
    }
    if !raw_delta.is_finite() || raw_delta <= 0.0 {
        warn!("Degenerate frame delta {}, clamping to {}", raw_delta, MIN_DELTA_TIME);
    }
    MIN_DELTA_TIME
}

/// Configuration for frame timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Fixed timestep for simulation (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Frame clock with a fixed-step accumulator
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped)
    pub delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl FrameClock {
    /// Create a new clock with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Advance the clock with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.delta_time = sanitize_delta(raw_delta).min(self.config.max_delta_time);
        self.frame_count += 1;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Get the number of fixed timesteps to process this frame
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        steps
    }

    /// Get the interpolation factor for rendering between fixed steps
    pub fn fixed_interpolation(&self) -> f32 {
        self.fixed_accumulator / self.config.fixed_timestep
    }
}
