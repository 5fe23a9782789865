//! Pointer click handling and pick scene assembly

use bevy::prelude::*;
use bevy::ui::ComputedNode;
use bevy::window::PrimaryWindow;

use crate::bodies::{BodyId, BodyRegistry};
use crate::camera::MainCamera;
use crate::core::CoreError;
use crate::orbital::WorldPoses;
use crate::picking::PickingConfig;
use crate::picking::resolver::{LabelTarget, PickHit, PickScene, PickShape, VolumeRole, resolve};
use crate::selection::Selection;
use crate::ui::{UiCommand, UiState};
use crate::visualization::SceneConfig;
use crate::visualization::labels::BodyLabel;

/// Collect every pickable body volume for the current poses, in registry order.
///
/// The highlight shell only exists around `selected`.
pub fn build_pick_scene(
    registry: &BodyRegistry,
    poses: &WorldPoses,
    selected: Option<BodyId>,
    config: &SceneConfig,
) -> PickScene {
    let mut scene = PickScene::default();
    for body in registry.iter() {
        let Some(center) = poses.position(body.id) else {
            continue;
        };
        let radius = body.render_radius();

        scene.push_volume(body.id, VolumeRole::Body, PickShape::Sphere { center, radius });
        if body.has_rings {
            scene.push_volume(
                body.id,
                VolumeRole::Ring,
                PickShape::Disk {
                    center,
                    normal: Dir3::Y,
                    inner_radius: radius * config.ring_inner_factor,
                    outer_radius: radius * config.ring_outer_factor,
                },
            );
        }
        if selected == Some(body.id) {
            scene.push_volume(
                body.id,
                VolumeRole::Highlight,
                PickShape::Sphere {
                    center,
                    radius: radius * config.highlight_factor,
                },
            );
        }
    }
    scene
}

/// World position of a body's label.
pub fn label_anchor(center: Vec3, radius: f32, config: &SceneConfig) -> Vec3 {
    center + Vec3::Y * (radius + config.label_lift)
}

/// Cast the camera ray through `cursor` (viewport pixels) and resolve it.
pub fn pick_at(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    cursor: Vec2,
    scene: &PickScene,
) -> Result<Option<PickHit>, CoreError> {
    let ray = camera
        .viewport_to_world(camera_transform, cursor)
        .map_err(|_| CoreError::DegenerateInput("pointer is outside the camera viewport"))?;
    Ok(resolve(ray, cursor, scene))
}

/// System to turn a short left click into a body selection
///
/// Presses that move further than the drag threshold belong to the orbit rig.
#[allow(clippy::too_many_arguments)]
pub fn pick_body_on_click(
    mouse: Res<ButtonInput<MouseButton>>,
    config: Res<PickingConfig>,
    scene_config: Res<SceneConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    labels: Query<(&BodyLabel, &ComputedNode)>,
    registry: Res<BodyRegistry>,
    poses: Res<WorldPoses>,
    selection: Res<Selection>,
    ui_state: Res<UiState>,
    mut pressed_at: Local<Option<Vec2>>,
    mut commands: MessageWriter<UiCommand>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if mouse.just_pressed(MouseButton::Left) {
        *pressed_at = window.cursor_position();
    }
    if !mouse.just_released(MouseButton::Left) {
        return;
    }
    let (Some(start), Some(cursor)) = (pressed_at.take(), window.cursor_position()) else {
        return;
    };
    if start.distance(cursor) > config.drag_threshold_px {
        return;
    }

    let Ok((camera, camera_transform)) = cameras.single() else {
        warn!("pick_body_on_click: main camera not found");
        return;
    };

    let mut scene = build_pick_scene(&registry, &poses, selection.selected(), &scene_config);
    if ui_state.show_labels {
        let camera_position = camera_transform.translation();
        for (label, computed) in &labels {
            let (Some(body), Some(center)) = (registry.get(label.0), poses.position(label.0))
            else {
                continue;
            };
            let anchor = label_anchor(center, body.render_radius(), &scene_config);
            let Ok(corner) = camera.world_to_viewport(camera_transform, anchor) else {
                continue;
            };
            let size = computed.size() * computed.inverse_scale_factor();
            scene.push_label(LabelTarget::at_anchor(
                label.0,
                corner,
                size,
                camera_position.distance(anchor),
            ));
        }
        scene.labels.sort_by_key(|label| label.owner.index());
    }

    match pick_at(camera, camera_transform, cursor, &scene) {
        Ok(Some(hit)) => {
            debug!("Picked body #{} via {:?}", hit.body.index(), hit.role);
            commands.write(UiCommand::SelectBody(hit.body));
        }
        Ok(None) => {}
        Err(err) => warn!("Pick ignored: {err}"),
    }
}
