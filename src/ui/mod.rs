//! User interface module
//!
//! Key bindings, the command queue into the core, and the bevy_ui panels that
//! show the current selection, clock state and notifications.

use bevy::prelude::*;

pub mod panels;
pub mod state;
pub mod systems;

pub use state::{Toast, UiCommand, UiState};
pub use systems::{apply_ui_commands, handle_key_bindings};

use crate::core::TickSet;
use crate::picking::pick_body_on_click;

/// Plugin for user interface management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .init_resource::<Toast>()
            .add_message::<UiCommand>()
            .add_systems(Startup, panels::setup_panels)
            .add_systems(
                Update,
                (
                    (
                        handle_key_bindings,
                        apply_ui_commands
                            .after(handle_key_bindings)
                            .after(pick_body_on_click),
                    )
                        .in_set(TickSet::Input),
                    (systems::update_toast, panels::update_panels)
                        .chain()
                        .in_set(TickSet::Present),
                ),
            );
    }
}
