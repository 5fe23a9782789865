//! Visualization module
//!
//! Rendering side of the viewer: body meshes placed from `WorldPoses`, ring
//! and highlight children, orbit guides, name labels and lighting. Nothing here
//! feeds back into the simulation.

use bevy::prelude::*;

pub mod bodies;
pub mod config;
pub mod labels;
pub mod lighting;

pub use config::SceneConfig;

use crate::core::TickSet;

/// Plugin for visualization systems
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .add_systems(
                Startup,
                (
                    bodies::spawn_bodies,
                    labels::spawn_labels,
                    lighting::setup_lighting,
                ),
            )
            .add_systems(
                Update,
                (
                    bodies::apply_world_poses,
                    bodies::sync_highlight,
                    labels::update_label_positions,
                    lighting::follow_star,
                )
                    .in_set(TickSet::Present),
            );
    }
}
