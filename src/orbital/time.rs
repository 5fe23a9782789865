//! Simulation clock

use bevy::prelude::*;

use crate::core::CoreError;

/// Days in a year; the global orbit speed is expressed in years per frame.
pub const DAYS_PER_YEAR: f64 = 365.25;
/// Frame rate the global orbit speed was calibrated against.
pub const REFERENCE_FRAME_RATE: f64 = 60.0;
/// Fraction of a year the clock covers per reference frame at 1x.
pub const DEFAULT_ORBIT_SPEED: f64 = 0.001_25;
/// Simulated days per simulated second at the default orbit speed.
pub const ORBIT_RATE: f64 = DEFAULT_ORBIT_SPEED * DAYS_PER_YEAR * REFERENCE_FRAME_RATE;

/// Simulation clock resource
#[derive(Resource, Debug, Clone)]
pub struct SimulationTime {
    /// Accumulated simulated seconds. Only ever grows.
    elapsed: f64,
    time_scale: f32,
    paused: bool,
    orbit_speed: f64,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self::with_orbit_speed(DEFAULT_ORBIT_SPEED)
    }
}

impl SimulationTime {
    pub fn with_orbit_speed(orbit_speed: f64) -> Self {
        Self {
            elapsed: 0.0,
            time_scale: 1.0,
            paused: false,
            orbit_speed: orbit_speed.max(0.0),
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Simulated days per simulated second.
    pub fn orbit_rate(&self) -> f64 {
        self.orbit_speed * DAYS_PER_YEAR * REFERENCE_FRAME_RATE
    }

    /// Elapsed simulated time expressed in days.
    pub fn elapsed_days(&self) -> f64 {
        self.elapsed * self.orbit_rate()
    }

    /// Advance by a real-time delta. Returns the simulated seconds added,
    /// which is zero while paused.
    pub fn advance(&mut self, dt_real_seconds: f64) -> f64 {
        if self.paused {
            return 0.0;
        }
        let scaled = (self.time_scale as f64 * dt_real_seconds).max(0.0);
        self.elapsed += scaled;
        scaled
    }

    /// Set the time multiplier. Zero is allowed and is independent of pause.
    pub fn set_time_scale(&mut self, scale: f32) -> Result<(), CoreError> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(CoreError::InvalidTimeScale(scale));
        }
        self.time_scale = scale;
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

/// System to advance the simulation clock by the frame delta
pub fn advance_simulation_clock(time: Res<Time>, mut sim_time: ResMut<SimulationTime>) {
    if sim_time.is_paused() {
        return;
    }
    sim_time.advance(time.delta_secs_f64());
}
