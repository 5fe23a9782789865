//! Per-frame ordering of the simulation tick.

use bevy::prelude::*;

/// One tick runs these sets in order, every frame, inside `Update`.
///
/// Discrete input (picking clicks, key toggles, UI commands) is applied in
/// `Input` before the clock advances, so it always sees last tick's poses.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum TickSet {
    Input,
    Simulate,
    Transform,
    Trail,
    Detect,
    Camera,
    Present,
}

pub struct TickSchedulePlugin;

impl Plugin for TickSchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                TickSet::Input,
                TickSet::Simulate,
                TickSet::Transform,
                TickSet::Trail,
                TickSet::Detect,
                TickSet::Camera,
                TickSet::Present,
            )
                .chain(),
        );
    }
}
