//! Star light and ambient fill

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::bodies::BodyRegistry;
use crate::orbital::WorldPoses;
use crate::visualization::config::SceneConfig;

/// Marker component for the point light sitting inside the star
#[derive(Component)]
pub struct StarLight;

pub fn setup_lighting(
    mut commands: Commands,
    config: Res<SceneConfig>,
    registry: Res<BodyRegistry>,
) {
    // Keep the night sides faintly visible.
    commands.insert_resource(GlobalAmbientLight {
        brightness: config.ambient_brightness,
        ..default()
    });

    let Some(star) = registry.get(registry.root()) else {
        return;
    };
    commands.spawn((
        PointLight {
            intensity: config.star_light_intensity,
            range: 5_000.0,
            radius: star.render_radius(),
            shadows_enabled: true,
            ..default()
        },
        Transform::default(),
        StarLight,
        Name::new("Star light"),
    ));
}

/// Keep the light on the star if the star ever moves
pub fn follow_star(
    registry: Res<BodyRegistry>,
    poses: Res<WorldPoses>,
    mut lights: Query<&mut Transform, With<StarLight>>,
) {
    let Some(position) = poses.position(registry.root()) else {
        return;
    };
    for mut transform in &mut lights {
        if transform.translation != position {
            transform.translation = position;
        }
    }
}
