//! Orbital simulator module
//!
//! This module owns the simulation clock, circular orbit kinematics, axial spin
//! and the parent-relative composition of world poses.

use bevy::prelude::*;

pub mod hierarchy;
pub mod kinematics;
pub mod time;

pub use hierarchy::{WorldPoses, update_world_poses};
pub use kinematics::{AxialSpin, advance_axial_spin};
pub use time::{SimulationTime, advance_simulation_clock};

use crate::bodies::BodyRegistry;
use crate::core::TickSet;

/// Plugin for the clock and transform hierarchy
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationTime>()
            .init_resource::<AxialSpin>()
            .init_resource::<WorldPoses>()
            .add_systems(Startup, init_world_poses)
            .add_systems(
                Update,
                (
                    (advance_simulation_clock, advance_axial_spin).in_set(TickSet::Simulate),
                    update_world_poses.in_set(TickSet::Transform),
                ),
            );
    }
}

/// Size the spin table and compute the t = 0 poses before the first frame.
fn init_world_poses(
    registry: Res<BodyRegistry>,
    sim_time: Res<SimulationTime>,
    mut spin: ResMut<AxialSpin>,
    mut poses: ResMut<WorldPoses>,
) {
    *spin = AxialSpin::new(registry.len());
    poses.recompute(
        &registry,
        sim_time.elapsed(),
        sim_time.orbit_rate(),
        &spin,
        Vec3::ZERO,
    );
    info!("Orbital simulator ready with {} bodies", registry.len());
}
