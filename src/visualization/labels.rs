//! Screen-space name labels that track their body

use bevy::prelude::*;

use crate::bodies::{BodyId, BodyRegistry};
use crate::camera::MainCamera;
use crate::orbital::WorldPoses;
use crate::picking::label_anchor;
use crate::ui::UiState;
use crate::visualization::config::{SceneConfig, hex_color};

/// Label text node for one body
#[derive(Component, Clone, Copy, Debug)]
pub struct BodyLabel(pub BodyId);

pub fn spawn_labels(mut commands: Commands, registry: Res<BodyRegistry>) {
    for body in registry.iter() {
        commands.spawn((
            Text::new(body.name),
            TextFont {
                font_size: 13.0,
                ..default()
            },
            TextColor(hex_color(body.color)),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            BodyLabel(body.id),
        ));
    }
}

/// System to move labels to their body's projected anchor
pub fn update_label_positions(
    ui_state: Res<UiState>,
    config: Res<SceneConfig>,
    registry: Res<BodyRegistry>,
    poses: Res<WorldPoses>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut labels: Query<(&BodyLabel, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    for (label, mut node, mut visibility) in &mut labels {
        let screen = if ui_state.show_labels {
            registry.get(label.0).zip(poses.position(label.0)).and_then(|(body, center)| {
                let anchor = label_anchor(center, body.render_radius(), &config);
                camera.world_to_viewport(camera_transform, anchor).ok()
            })
        } else {
            None
        };

        match screen {
            Some(point) => {
                node.left = Val::Px(point.x);
                node.top = Val::Px(point.y);
                visibility.set_if_neq(Visibility::Inherited);
            }
            None => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}
