//! Trail recording and gizmo drawing systems

use bevy::prelude::*;

use crate::bodies::{BodyKind, BodyRegistry};
use crate::orbital::{SimulationTime, WorldPoses};
use crate::trail::TrailConfig;
use crate::trail::history::TrailHistory;
use crate::visualization::config::hex_color;

/// System to append the current world position of every orbiting body
pub fn record_trail_samples(
    time: Res<Time>,
    sim_time: Res<SimulationTime>,
    config: Res<TrailConfig>,
    registry: Res<BodyRegistry>,
    poses: Res<WorldPoses>,
    mut trails: ResMut<TrailHistory>,
    mut since_last: Local<f32>,
) {
    if !trails.is_enabled() || sim_time.is_paused() {
        return;
    }

    *since_last += time.delta_secs();
    if *since_last < config.sample_interval_seconds {
        return;
    }
    *since_last = 0.0;

    for body in registry.iter().filter(|b| b.kind != BodyKind::Star) {
        if let Some(position) = poses.position(body.id) {
            trails.record_sample(body.id, position);
        }
    }
}

/// System to draw each trail as a polyline ending at the live position
pub fn draw_trails(
    mut gizmos: Gizmos,
    config: Res<TrailConfig>,
    registry: Res<BodyRegistry>,
    poses: Res<WorldPoses>,
    trails: Res<TrailHistory>,
) {
    if !trails.is_enabled() {
        return;
    }

    for body in registry.iter() {
        if trails.len(body.id) < 2 {
            continue;
        }
        let color = hex_color(body.color).with_alpha(config.alpha);
        let live = poses.position(body.id);
        gizmos.linestrip(trails.samples(body.id).chain(live), color);
    }
}
