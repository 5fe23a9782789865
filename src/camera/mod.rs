//! Camera module
//!
//! `CameraController` is the single owner of the logical camera pose. Mouse
//! orbit/pan/zoom come from `bevy_panorbit_camera`; the controller reads the
//! rig back every tick and writes follow/zoom/reset results into it.

use bevy::prelude::*;

pub mod controller;
pub mod systems;

pub use controller::CameraController;
pub use systems::{sync_controller_from_rig, update_camera_controller, write_controller_to_rig};

use crate::core::TickSet;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin for the follow camera state machine
pub struct CameraControlPlugin;

impl Plugin for CameraControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraController>().add_systems(
            Update,
            (
                sync_controller_from_rig,
                update_camera_controller,
                write_controller_to_rig,
            )
                .chain()
                .in_set(TickSet::Camera),
        );
    }
}
