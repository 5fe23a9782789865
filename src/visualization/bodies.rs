//! Body meshes, rings, highlight shells and orbit guides

use std::f32::consts::FRAC_PI_2;

use bevy::light::NotShadowCaster;
use bevy::prelude::*;

use crate::bodies::{BodyId, BodyKind, BodyRegistry, CelestialBody};
use crate::orbital::WorldPoses;
use crate::selection::Selection;
use crate::visualization::config::{SceneConfig, hex_color};

/// Links a body mesh entity back to its body.
#[derive(Component, Clone, Copy, Debug)]
pub struct BodyMarker(pub BodyId);

/// Marker for highlight shells
#[derive(Component)]
pub struct HighlightShell;

/// Entities owned by one body, built once at startup.
#[derive(Clone, Copy, Debug)]
pub struct BodyEntities {
    pub body: Entity,
    pub highlight: Entity,
}

/// Body id to rendered entities, indexed by `BodyId`.
#[derive(Resource, Debug, Default)]
pub struct BodyVisuals {
    entries: Vec<BodyEntities>,
}

impl BodyVisuals {
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &BodyEntities)> {
        self.entries.iter().enumerate().map(|(i, e)| (BodyId(i), e))
    }
}

fn body_material(body: &CelestialBody) -> StandardMaterial {
    let color = hex_color(body.color);
    match body.kind {
        BodyKind::Star => StandardMaterial {
            base_color: color,
            emissive: color.to_linear() * 4.0,
            unlit: true,
            ..default()
        },
        BodyKind::Planet | BodyKind::Moon => StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        },
    }
}

fn flat_material(color: Color, alpha: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(alpha),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        double_sided: true,
        ..default()
    }
}

/// Annulus mesh plus the rotation that lays it in the XZ plane.
fn flat_annulus(meshes: &mut Assets<Mesh>, inner: f32, outer: f32) -> (Mesh3d, Transform) {
    (
        Mesh3d(meshes.add(Annulus::new(inner.max(0.0), outer))),
        Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
    )
}

pub fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    registry: Res<BodyRegistry>,
    poses: Res<WorldPoses>,
    config: Res<SceneConfig>,
) {
    let highlight_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.15),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    // Breadth-first order: a parent's entity always exists before its moons.
    let mut entries: Vec<BodyEntities> = Vec::with_capacity(registry.len());
    for body in registry.iter() {
        let radius = body.render_radius();
        let color = hex_color(body.color);

        let mut body_cmds = commands.spawn((
            Mesh3d(meshes.add(Sphere::new(radius).mesh().uv(32, 18))),
            MeshMaterial3d(materials.add(body_material(body))),
            Transform::from_translation(poses.position(body.id).unwrap_or_default()),
            Visibility::Visible,
            BodyMarker(body.id),
            Name::new(body.name),
        ));
        if body.kind == BodyKind::Star {
            body_cmds.insert(NotShadowCaster);
        }
        let body_entity = body_cmds.id();

        if body.has_rings {
            let (mesh, transform) = flat_annulus(
                &mut meshes,
                radius * config.ring_inner_factor,
                radius * config.ring_outer_factor,
            );
            commands.spawn((
                mesh,
                MeshMaterial3d(materials.add(flat_material(color, 0.8))),
                transform,
                ChildOf(body_entity),
            ));
        }

        let highlight = commands
            .spawn((
                Mesh3d(meshes.add(Sphere::new(radius * config.highlight_factor).mesh().uv(32, 18))),
                MeshMaterial3d(highlight_material.clone()),
                Transform::default(),
                Visibility::Hidden,
                NotShadowCaster,
                HighlightShell,
                ChildOf(body_entity),
            ))
            .id();

        if let Some(orbit) = body.orbit {
            let half_width = match body.kind {
                BodyKind::Moon => config.moon_orbit_half_width,
                _ => config.planet_orbit_half_width,
            };
            let orbit_radius = orbit.render_radius as f32;
            let (mesh, transform) =
                flat_annulus(&mut meshes, orbit_radius - half_width, orbit_radius + half_width);
            let mut guide = commands.spawn((
                mesh,
                MeshMaterial3d(materials.add(flat_material(color, config.orbit_guide_alpha))),
                transform,
                NotShadowCaster,
                Name::new(format!("{} orbit", body.name)),
            ));
            // Moon guides ride along with their planet.
            if body.kind == BodyKind::Moon
                && let Some(parent) = body.parent.and_then(|p| entries.get(p.index()))
            {
                guide.insert(ChildOf(parent.body));
            }
        }

        entries.push(BodyEntities {
            body: body_entity,
            highlight,
        });
    }

    info!("Spawned {} bodies", entries.len());
    commands.insert_resource(BodyVisuals { entries });
}

/// System to place every body at its world pose
pub fn apply_world_poses(
    poses: Res<WorldPoses>,
    mut bodies: Query<(&BodyMarker, &mut Transform)>,
) {
    for (marker, mut transform) in &mut bodies {
        let Some(pose) = poses.get(marker.0) else {
            continue;
        };
        transform.translation = pose.position;
        transform.rotation = Quat::from_rotation_y(pose.rotation);
    }
}

/// System to show the highlight shell around the selected body only
pub fn sync_highlight(
    selection: Res<Selection>,
    visuals: Res<BodyVisuals>,
    mut shells: Query<&mut Visibility, With<HighlightShell>>,
) {
    if !selection.is_changed() {
        return;
    }
    for (id, entities) in visuals.iter() {
        if let Ok(mut visibility) = shells.get_mut(entities.highlight) {
            visibility.set_if_neq(if selection.selected() == Some(id) {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            });
        }
    }
}
