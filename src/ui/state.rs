//! UI state management

use bevy::prelude::*;

use crate::bodies::BodyId;

/// Main UI state resource
#[derive(Resource, Debug)]
pub struct UiState {
    pub show_labels: bool,
    pub show_help: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_labels: true,
            show_help: true,
        }
    }
}

/// Commands the UI (keys, clicks, menus) sends into the core.
///
/// Commands are applied at the start of the next tick, in the order written.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum UiCommand {
    SelectByName(String),
    SelectBody(BodyId),
    StopFollowing,
    ResetCamera,
    ToggleFollow,
    ZoomToSelected,
    SetTimeScale(f32),
    SetPaused(bool),
    TogglePause,
    ToggleTrails,
    ToggleLabels,
    ToggleHelp,
}

/// Transient on-screen notification
#[derive(Resource, Debug, Default)]
pub struct Toast {
    pub message: Option<String>,
    pub remaining_secs: f32,
}

impl Toast {
    pub fn show(&mut self, message: String, duration_secs: f32) {
        self.message = Some(message);
        self.remaining_secs = duration_secs;
    }

    /// Count down by `dt`; the message is dropped once time runs out.
    pub fn tick(&mut self, dt: f32) {
        if self.message.is_none() {
            return;
        }
        self.remaining_secs -= dt;
        if self.remaining_secs <= 0.0 {
            self.message = None;
            self.remaining_secs = 0.0;
        }
    }
}
