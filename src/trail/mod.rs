//! Trail history module
//!
//! Per-body bounded position history, recorded every tick while enabled and
//! drawn as fading polylines.

use bevy::prelude::*;

pub mod history;
pub mod systems;

pub use history::TrailHistory;
pub use systems::{draw_trails, record_trail_samples};

use crate::core::TickSet;

/// Plugin for trail recording and drawing
pub struct TrailPlugin;

impl Plugin for TrailPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrailConfig>()
            .init_resource::<TrailHistory>()
            .add_systems(
                Update,
                (
                    record_trail_samples.in_set(TickSet::Trail),
                    draw_trails.in_set(TickSet::Present),
                ),
            );
    }
}

/// Global configuration for trail recording
#[derive(Resource, Debug)]
pub struct TrailConfig {
    /// Real seconds between two recorded samples
    pub sample_interval_seconds: f32,
    /// Line opacity
    pub alpha: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            sample_interval_seconds: 0.1,
            alpha: 0.6,
        }
    }
}
