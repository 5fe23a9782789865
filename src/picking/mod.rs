//! Picking module
//!
//! Resolves a pointer click to the nearest body. Rings and highlight shells
//! resolve to the body that owns them; visible labels are a fallback target.

use bevy::prelude::*;

pub mod resolver;
pub mod systems;

pub use systems::{label_anchor, pick_body_on_click};

use crate::core::TickSet;

/// Plugin for pointer picking
pub struct BodyPickingPlugin;

impl Plugin for BodyPickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PickingConfig>()
            .add_systems(Update, pick_body_on_click.in_set(TickSet::Input));
    }
}

#[derive(Resource, Debug)]
pub struct PickingConfig {
    /// Max cursor travel between press and release for a click, in logical px.
    pub drag_threshold_px: f32,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 4.0,
        }
    }
}
