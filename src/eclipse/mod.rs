//! Eclipse event module
//!
//! Watches star / planet / moon triples and emits a notification each time one
//! of them moves into near-collinear alignment.

use bevy::prelude::*;

pub mod detector;

pub use detector::EclipseDetector;

use crate::bodies::BodyRegistry;
use crate::core::TickSet;
use crate::orbital::WorldPoses;

/// Plugin for eclipse detection
pub struct EclipsePlugin;

impl Plugin for EclipsePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EclipseConfig>()
            .init_resource::<EclipseDetector>()
            .add_message::<EclipseNotice>()
            .add_systems(Startup, setup_eclipse_watches)
            .add_systems(Update, detect_eclipses.in_set(TickSet::Detect));
    }
}

#[derive(Resource, Debug, Clone)]
pub struct EclipseConfig {
    /// Minimum dot product between the two unit vectors.
    pub alignment_threshold: f32,
    /// How long a notification stays on screen, in seconds.
    pub notice_seconds: f32,
    /// Triples to watch as (reference, primary, secondary) names.
    pub triples: Vec<(&'static str, &'static str, &'static str)>,
}

impl Default for EclipseConfig {
    fn default() -> Self {
        Self {
            alignment_threshold: 0.999,
            notice_seconds: 5.0,
            triples: vec![("Sun", "Earth", "Moon")],
        }
    }
}

/// Fire-once notification for the UI.
#[derive(Message, Clone, Debug)]
pub struct EclipseNotice {
    pub message: String,
    pub duration_secs: f32,
}

fn setup_eclipse_watches(
    config: Res<EclipseConfig>,
    registry: Res<BodyRegistry>,
    mut detector: ResMut<EclipseDetector>,
) {
    *detector = EclipseDetector::new(config.alignment_threshold);
    for (reference, primary, secondary) in &config.triples {
        if let Err(err) = detector.watch_by_name(&registry, reference, primary, secondary) {
            warn!("Skipping eclipse watch {reference}/{primary}/{secondary}: {err}");
        }
    }
    info!("Watching {} eclipse triple(s)", detector.watches().len());
}

/// System to evaluate every watch against this tick's poses
pub fn detect_eclipses(
    config: Res<EclipseConfig>,
    poses: Res<WorldPoses>,
    mut detector: ResMut<EclipseDetector>,
    mut notices: MessageWriter<EclipseNotice>,
) {
    for message in detector.evaluate(&poses) {
        info!("{message}");
        notices.write(EclipseNotice {
            message,
            duration_secs: config.notice_seconds,
        });
    }
}
