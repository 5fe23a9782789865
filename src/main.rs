use anyhow::Context;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod bodies;
mod camera;
mod core;
mod eclipse;
mod orbital;
mod picking;
mod selection;
mod trail;
mod ui;
mod visualization;

use bodies::{BodyRegistry, SUN};
use camera::controller::CameraConfig;
use camera::{CameraControlPlugin, MainCamera};
use crate::core::schedule::TickSchedulePlugin;
use eclipse::EclipsePlugin;
use orbital::OrbitalPlugin;
use picking::BodyPickingPlugin;
use selection::Selection;
use trail::TrailPlugin;
use ui::UiPlugin;
use visualization::VisualizationPlugin;

// Setup the main camera on its PanOrbit rig
pub fn setup(mut commands: Commands) {
    let config = CameraConfig::default();
    let offset = config.default_position - config.default_look_at;
    let radius = offset.length();

    let pan_orbit = PanOrbitCamera {
        focus: config.default_look_at,
        radius: Some(radius),
        yaw: Some(offset.x.atan2(offset.z)),
        pitch: Some((offset.y / radius).asin()),
        zoom_lower_limit: 0.05,
        zoom_upper_limit: Some(3_000.0),
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_y,
            // Render units: the outermost planet orbits at ~1500.
            near: 0.01,
            far: 10_000.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(config.default_position)
            .looking_at(config.default_look_at, Vec3::Y),
    ));
}

fn main() -> anyhow::Result<()> {
    let registry =
        BodyRegistry::from_catalog(&SUN).context("compiled-in body catalog is invalid")?;

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.insert_resource(registry);
    app.init_resource::<Selection>();

    app.add_plugins(PanOrbitCameraPlugin);

    // Add our custom plugins
    app.add_plugins(TickSchedulePlugin);
    app.add_plugins(OrbitalPlugin);
    app.add_plugins(TrailPlugin);
    app.add_plugins(EclipsePlugin);
    app.add_plugins(CameraControlPlugin);
    app.add_plugins(BodyPickingPlugin);
    app.add_plugins(UiPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_systems(Startup, setup);

    app.run();
    Ok(())
}
