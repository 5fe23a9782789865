//! Keyboard bindings and command application

use bevy::prelude::*;

use crate::bodies::{BodyId, BodyRegistry};
use crate::camera::CameraController;
use crate::core::CoreError;
use crate::eclipse::EclipseNotice;
use crate::orbital::{SimulationTime, WorldPoses};
use crate::selection::{Selection, select_body, select_by_name};
use crate::trail::TrailHistory;
use crate::ui::state::{Toast, UiCommand, UiState};

/// Preset time scales on the digit keys 1-5.
pub const SPEED_PRESETS: [(KeyCode, f32); 5] = [
    (KeyCode::Digit1, 0.25),
    (KeyCode::Digit2, 0.5),
    (KeyCode::Digit3, 1.0),
    (KeyCode::Digit4, 2.0),
    (KeyCode::Digit5, 5.0),
];

/// Next body in registry order after `current`, wrapping around.
pub fn cycle_body(current: Option<BodyId>, count: usize, backwards: bool) -> Option<BodyId> {
    if count == 0 {
        return None;
    }
    let next = match (current, backwards) {
        (None, false) => 0,
        (None, true) => count - 1,
        (Some(id), false) => (id.index() + 1) % count,
        (Some(id), true) => (id.index() + count - 1) % count,
    };
    Some(BodyId(next))
}

/// System to translate discrete key presses into UI commands
pub fn handle_key_bindings(
    keys: Res<ButtonInput<KeyCode>>,
    registry: Res<BodyRegistry>,
    selection: Res<Selection>,
    mut commands: MessageWriter<UiCommand>,
) {
    if keys.just_pressed(KeyCode::KeyE) {
        commands.write(UiCommand::ToggleFollow);
    }
    if keys.just_pressed(KeyCode::KeyT) {
        commands.write(UiCommand::ToggleTrails);
    }
    if keys.just_pressed(KeyCode::KeyL) {
        commands.write(UiCommand::ToggleLabels);
    }
    if keys.just_pressed(KeyCode::KeyH) {
        commands.write(UiCommand::ToggleHelp);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        commands.write(UiCommand::ResetCamera);
    }
    if keys.just_pressed(KeyCode::KeyZ) {
        commands.write(UiCommand::ZoomToSelected);
    }
    if keys.just_pressed(KeyCode::Escape) {
        commands.write(UiCommand::StopFollowing);
    }
    if keys.just_pressed(KeyCode::Space) {
        commands.write(UiCommand::TogglePause);
    }
    for (key, scale) in SPEED_PRESETS {
        if keys.just_pressed(key) {
            commands.write(UiCommand::SetTimeScale(scale));
        }
    }
    if keys.just_pressed(KeyCode::Tab) {
        let backwards = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);
        if let Some(id) = cycle_body(selection.selected(), registry.len(), backwards)
            && let Some(body) = registry.get(id)
        {
            commands.write(UiCommand::SelectByName(body.name.to_string()));
        }
    }
}

/// Everything a UI command may touch.
pub struct CommandTargets<'a> {
    pub registry: &'a BodyRegistry,
    pub poses: &'a WorldPoses,
    pub selection: &'a mut Selection,
    pub camera: &'a mut CameraController,
    pub sim_time: &'a mut SimulationTime,
    pub trails: &'a mut TrailHistory,
    pub ui_state: &'a mut UiState,
}

/// Apply a single command. Failures leave state unchanged.
pub fn apply_ui_command(command: &UiCommand, t: &mut CommandTargets) -> Result<(), CoreError> {
    match command {
        UiCommand::SelectByName(name) => {
            select_by_name(name, t.registry, t.poses, t.selection, t.camera)?;
        }
        UiCommand::SelectBody(id) => {
            select_body(*id, t.registry, t.poses, t.selection, t.camera)?;
        }
        UiCommand::StopFollowing => {
            t.camera.stop_following();
            info!("Follow Mode: Off");
        }
        UiCommand::ResetCamera => {
            t.camera.reset();
            t.selection.clear();
            info!("Camera reset");
        }
        UiCommand::ToggleFollow => {
            let following = t.camera.toggle_follow()?;
            info!("Follow Mode: {}", if following { "On" } else { "Off" });
        }
        UiCommand::ZoomToSelected => {
            let id = t.camera.followed().ok_or(CoreError::NoSelection)?;
            let body = t
                .registry
                .get(id)
                .ok_or_else(|| CoreError::NotFound(format!("body #{}", id.index())))?;
            let target = t
                .poses
                .position(id)
                .ok_or_else(|| CoreError::NotFound(body.name.to_string()))?;
            t.camera.zoom_to_followed(target, body.render_radius())?;
            info!("Zooming to {}", body.name);
        }
        UiCommand::SetTimeScale(scale) => {
            t.sim_time.set_time_scale(*scale)?;
            info!("Time scale set to {scale}x");
        }
        UiCommand::SetPaused(paused) => t.sim_time.set_paused(*paused),
        UiCommand::TogglePause => {
            let paused = !t.sim_time.is_paused();
            t.sim_time.set_paused(paused);
            info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
        UiCommand::ToggleTrails => {
            let enabled = !t.trails.is_enabled();
            t.trails.set_recording_enabled(enabled);
            info!("Trails {}", if enabled { "on" } else { "off" });
        }
        UiCommand::ToggleLabels => {
            t.ui_state.show_labels = !t.ui_state.show_labels;
        }
        UiCommand::ToggleHelp => {
            t.ui_state.show_help = !t.ui_state.show_help;
        }
    }
    Ok(())
}

/// System to apply this tick's UI commands in order
#[allow(clippy::too_many_arguments)]
pub fn apply_ui_commands(
    mut commands: MessageReader<UiCommand>,
    registry: Res<BodyRegistry>,
    poses: Res<WorldPoses>,
    mut selection: ResMut<Selection>,
    mut camera: ResMut<CameraController>,
    mut sim_time: ResMut<SimulationTime>,
    mut trails: ResMut<TrailHistory>,
    mut ui_state: ResMut<UiState>,
) {
    let mut targets = CommandTargets {
        registry: &registry,
        poses: &poses,
        selection: &mut selection,
        camera: &mut camera,
        sim_time: &mut sim_time,
        trails: &mut trails,
        ui_state: &mut ui_state,
    };
    for command in commands.read() {
        if let Err(err) = apply_ui_command(command, &mut targets) {
            warn!("{command:?} ignored: {err}");
        }
    }
}

/// System to show eclipse notifications and expire old ones
pub fn update_toast(
    time: Res<Time>,
    mut notices: MessageReader<EclipseNotice>,
    mut toast: ResMut<Toast>,
) {
    toast.tick(time.delta_secs());
    for notice in notices.read() {
        toast.show(notice.message.clone(), notice.duration_secs);
    }
}
