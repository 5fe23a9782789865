//! On-screen panels: selected body info, status/help line and notifications

use bevy::prelude::*;

use crate::bodies::BodyRegistry;
use crate::camera::CameraController;
use crate::orbital::SimulationTime;
use crate::selection::Selection;
use crate::trail::TrailHistory;
use crate::ui::state::{Toast, UiState};

const HELP_TEXT: &str = "Click/Tab: select  E: follow  Z: zoom  Esc: stop  WASD: move  \
                         R: reset  T: trails  L: labels  Space: pause  1-5: speed  H: help";

/// Which piece of panel text an entity shows.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelText {
    BodyName,
    BodyInfo,
    FollowStatus,
    Status,
    Help,
    Toast,
}

/// Marker for the selected-body panel container
#[derive(Component)]
pub struct InfoPanel;

/// Marker for the notification container
#[derive(Component)]
pub struct ToastPanel;

fn text(kind: PanelText, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(""),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        kind,
    )
}

pub fn setup_panels(mut commands: Commands) {
    let panel_bg = BackgroundColor(Color::srgba(0.02, 0.04, 0.08, 0.8));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            max_width: Val::Px(320.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            padding: UiRect::all(Val::Px(10.0)),
            ..default()
        },
        panel_bg,
        Visibility::Hidden,
        InfoPanel,
        children![
            text(PanelText::BodyName, 22.0, Color::WHITE),
            text(PanelText::BodyInfo, 15.0, Color::srgb(0.8, 0.85, 0.9)),
            text(PanelText::FollowStatus, 15.0, Color::srgb(0.5, 0.9, 0.95)),
        ],
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(2.0),
            ..default()
        },
        children![
            text(PanelText::Status, 15.0, Color::WHITE),
            text(PanelText::Help, 13.0, Color::srgb(0.6, 0.65, 0.7)),
        ],
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Visibility::Hidden,
        ToastPanel,
        children![(
            Node {
                padding: UiRect::axes(Val::Px(14.0), Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.3, 0.1, 0.02, 0.85)),
            children![text(PanelText::Toast, 18.0, Color::srgb(1.0, 0.85, 0.5))],
        )],
    ));
}

/// Status line for the clock and trail state.
pub fn status_line(sim_time: &SimulationTime, trails_on: bool) -> String {
    format!(
        "Speed: {}x{}  |  Day {:.0}  |  Trails: {}",
        sim_time.time_scale(),
        if sim_time.is_paused() { " (paused)" } else { "" },
        sim_time.elapsed_days(),
        if trails_on { "On" } else { "Off" },
    )
}

/// System to refresh panel text from core state
#[allow(clippy::too_many_arguments)]
pub fn update_panels(
    registry: Res<BodyRegistry>,
    selection: Res<Selection>,
    camera: Res<CameraController>,
    sim_time: Res<SimulationTime>,
    trails: Res<TrailHistory>,
    ui_state: Res<UiState>,
    toast: Res<Toast>,
    mut texts: Query<(&PanelText, &mut Text)>,
    mut info_panel: Query<&mut Visibility, (With<InfoPanel>, Without<ToastPanel>)>,
    mut toast_panel: Query<&mut Visibility, (With<ToastPanel>, Without<InfoPanel>)>,
) {
    let selected = selection.selected().and_then(|id| registry.get(id));

    if let Ok(mut visibility) = info_panel.single_mut() {
        visibility.set_if_neq(if selected.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
    if let Ok(mut visibility) = toast_panel.single_mut() {
        visibility.set_if_neq(if toast.message.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }

    for (kind, mut text) in &mut texts {
        let value = match kind {
            PanelText::BodyName => selected.map(|b| b.name.to_string()).unwrap_or_default(),
            PanelText::BodyInfo => selected.map(|b| b.info.to_string()).unwrap_or_default(),
            PanelText::FollowStatus => format!(
                "Follow Mode: {}",
                if camera.is_following() { "On" } else { "Off" }
            ),
            PanelText::Status => status_line(&sim_time, trails.is_enabled()),
            PanelText::Help if ui_state.show_help => HELP_TEXT.to_string(),
            PanelText::Help => String::new(),
            PanelText::Toast => toast.message.clone().unwrap_or_default(),
        };
        if text.0 != value {
            text.0 = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        let mut sim_time = SimulationTime::default();
        sim_time.set_time_scale(2.0).unwrap();
        assert!(status_line(&sim_time, false).starts_with("Speed: 2x  |"));
        sim_time.set_paused(true);
        let line = status_line(&sim_time, true);
        assert!(line.contains("(paused)"));
        assert!(line.ends_with("Trails: On"));
    }
}
