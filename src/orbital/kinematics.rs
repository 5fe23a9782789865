//! Circular orbit kinematics and axial spin.
//!
//! Orbital position is a pure function of total simulated time. Axial spin is a
//! separate accumulator driven by the real frame delta, so the two use
//! different clock bases.

use bevy::prelude::*;
use std::f64::consts::TAU;

use crate::bodies::BodyRegistry;
use crate::orbital::SimulationTime;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Orbital angle in `[0, 2π)` at simulated time `t` for a body with period
/// `period_days`. `orbit_rate` converts simulated seconds to days.
pub fn orbital_angle(t: f64, orbit_rate: f64, period_days: f64) -> f64 {
    (TAU * (t * orbit_rate / period_days)).rem_euclid(TAU)
}

/// Offset from the parent in its equatorial (XZ) plane.
pub fn orbital_offset(radius: f64, angle: f64) -> Vec3 {
    Vec3::new(
        (radius * angle.cos()) as f32,
        0.0,
        (radius * angle.sin()) as f32,
    )
}

/// Spin increment in radians for one frame.
pub fn spin_delta(rotation_period_days: f64, time_scale: f32, dt_real_seconds: f64) -> f64 {
    TAU / (rotation_period_days * SECONDS_PER_DAY) * time_scale as f64 * dt_real_seconds
}

/// Accumulated axial rotation per body, indexed by `BodyId`.
#[derive(Resource, Debug, Default)]
pub struct AxialSpin {
    angles: Vec<f64>,
}

impl AxialSpin {
    pub fn new(body_count: usize) -> Self {
        Self {
            angles: vec![0.0; body_count],
        }
    }

    pub fn angle(&self, index: usize) -> f32 {
        self.angles.get(index).copied().unwrap_or(0.0) as f32
    }

    /// Accumulate one frame of spin for every body that declares a rotation
    /// period. Bodies without one keep a zero angle.
    pub fn advance(&mut self, registry: &BodyRegistry, time_scale: f32, dt_real_seconds: f64) {
        if self.angles.len() != registry.len() {
            self.angles.resize(registry.len(), 0.0);
        }
        for body in registry.iter() {
            if let Some(days) = body.rotation_period_days {
                let angle = &mut self.angles[body.id.index()];
                *angle = (*angle + spin_delta(days, time_scale, dt_real_seconds)).rem_euclid(TAU);
            }
        }
    }
}

/// System to accumulate axial spin; shares the clock's pause flag.
pub fn advance_axial_spin(
    time: Res<Time>,
    sim_time: Res<SimulationTime>,
    registry: Res<BodyRegistry>,
    mut spin: ResMut<AxialSpin>,
) {
    if sim_time.is_paused() {
        return;
    }
    spin.advance(&registry, sim_time.time_scale(), time.delta_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::SUN;
    use crate::orbital::time::ORBIT_RATE;

    const EPSILON: f64 = 1e-9;

    fn angular_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    #[test]
    fn test_angle_is_periodic() {
        let periods = [87.97, 365.25, 27.32, 0.32, 59_800.0];
        let times = [0.0, 1.5, 42.0, 1234.567];
        for period in periods {
            let one_period = period / ORBIT_RATE;
            for t in times {
                let base = orbital_angle(t, ORBIT_RATE, period);
                for k in 1..=5 {
                    let later = orbital_angle(t + k as f64 * one_period, ORBIT_RATE, period);
                    assert!(
                        angular_distance(base, later) < 1e-6,
                        "period {period} t {t} k {k}: {base} vs {later}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_angle_stays_in_range() {
        for t in [0.0, 0.1, 10.0, 1e6] {
            let a = orbital_angle(t, ORBIT_RATE, 1.26);
            assert!((0.0..TAU).contains(&a));
        }
    }

    #[test]
    fn test_earth_returns_after_one_year() {
        let t = 365.25 / ORBIT_RATE;
        let angle = orbital_angle(t, ORBIT_RATE, 365.25);
        assert!(angular_distance(angle, 0.0) < EPSILON);

        let offset = orbital_offset(50.0, angle);
        assert!((offset - Vec3::new(50.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_quarter_orbit_points_along_z() {
        let t = 365.25 / ORBIT_RATE / 4.0;
        let offset = orbital_offset(50.0, orbital_angle(t, ORBIT_RATE, 365.25));
        assert!((offset - Vec3::new(0.0, 0.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn test_spin_one_rotation_per_period() {
        // One sidereal day of real time at 1x is one full turn.
        let delta = spin_delta(1.0, 1.0, SECONDS_PER_DAY);
        assert!((delta - TAU).abs() < EPSILON);
        assert_eq!(spin_delta(1.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_spin_skips_bodies_without_rotation() {
        let registry = BodyRegistry::from_catalog(&SUN).unwrap();
        let mut spin = AxialSpin::new(registry.len());
        spin.advance(&registry, 1000.0, 10.0);

        let earth = registry.find_by_name("Earth").unwrap();
        let phobos = registry.find_by_name("Phobos").unwrap();
        assert!(spin.angle(earth.index()) > 0.0);
        assert_eq!(spin.angle(phobos.index()), 0.0);
    }
}
