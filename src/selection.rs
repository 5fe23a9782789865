//! Selected body state and the select-by-name / select-by-id commands

use bevy::prelude::*;

use crate::bodies::{BodyId, BodyRegistry};
use crate::camera::CameraController;
use crate::core::CoreError;
use crate::orbital::WorldPoses;

/// Currently selected body, read by the info panel and highlight shell.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    selected: Option<BodyId>,
}

impl Selection {
    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// Select `id` and start following it from the default offset.
///
/// Only the selection and camera change; world poses are read, never advanced.
pub fn select_body(
    id: BodyId,
    registry: &BodyRegistry,
    poses: &WorldPoses,
    selection: &mut Selection,
    camera: &mut CameraController,
) -> Result<BodyId, CoreError> {
    let body = registry
        .get(id)
        .ok_or_else(|| CoreError::NotFound(format!("body #{}", id.index())))?;
    let target = poses
        .position(id)
        .ok_or_else(|| CoreError::NotFound(body.name.to_string()))?;

    selection.selected = Some(id);
    camera.follow(id, target);
    info!("Selected {} (following)", body.name);
    Ok(id)
}

/// Look `name` up in the registry and select it.
///
/// An unknown name leaves selection and camera untouched.
pub fn select_by_name(
    name: &str,
    registry: &BodyRegistry,
    poses: &WorldPoses,
    selection: &mut Selection,
    camera: &mut CameraController,
) -> Result<BodyId, CoreError> {
    let id = registry.find_by_name(name)?;
    select_body(id, registry, poses, selection, camera)
}
