//! Near-syzygy detection over designated body triples

use bevy::prelude::*;

use crate::bodies::{BodyId, BodyRegistry};
use crate::core::CoreError;
use crate::orbital::WorldPoses;

/// A reference / primary / secondary triple, e.g. star, planet and its moon.
#[derive(Clone, Debug, PartialEq)]
pub struct EclipseWatch {
    pub reference: BodyId,
    pub primary: BodyId,
    pub secondary: BodyId,
    pub message: String,
    /// Whether the condition held on the previous tick.
    was_aligned: bool,
}

impl EclipseWatch {
    pub fn new(reference: BodyId, primary: BodyId, secondary: BodyId, message: String) -> Self {
        Self {
            reference,
            primary,
            secondary,
            message,
            was_aligned: false,
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.was_aligned
    }
}

/// True when `secondary` sits almost exactly behind `primary` as seen from
/// `reference`, and closer to the primary than the primary is to the reference.
///
/// Coincident points never count as aligned.
pub fn is_aligned(reference: Vec3, primary: Vec3, secondary: Vec3, threshold: f32) -> bool {
    let outward = primary - reference;
    let beyond = secondary - primary;
    let (Some(a), Some(b)) = (outward.try_normalize(), beyond.try_normalize()) else {
        return false;
    };
    a.dot(b) > threshold && beyond.length() < outward.length()
}

/// Edge-triggered alignment detector.
#[derive(Resource, Debug, Clone, Default)]
pub struct EclipseDetector {
    threshold: f32,
    watches: Vec<EclipseWatch>,
}

impl EclipseDetector {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            watches: Vec::new(),
        }
    }

    pub fn watches(&self) -> &[EclipseWatch] {
        &self.watches
    }

    pub fn add_watch(&mut self, watch: EclipseWatch) {
        self.watches.push(watch);
    }

    /// Watch the triple named `reference`, `primary`, `secondary`.
    pub fn watch_by_name(
        &mut self,
        registry: &BodyRegistry,
        reference: &str,
        primary: &str,
        secondary: &str,
    ) -> Result<(), CoreError> {
        let watch = EclipseWatch::new(
            registry.find_by_name(reference)?,
            registry.find_by_name(primary)?,
            registry.find_by_name(secondary)?,
            format!("Eclipse: {secondary} is aligned with {primary} and the {reference}"),
        );
        self.add_watch(watch);
        Ok(())
    }

    /// Evaluate every watch against `poses` and return the messages of the
    /// watches that just entered alignment.
    pub fn evaluate(&mut self, poses: &WorldPoses) -> Vec<String> {
        let threshold = self.threshold;
        let mut fired = Vec::new();
        for watch in &mut self.watches {
            let (Some(reference), Some(primary), Some(secondary)) = (
                poses.position(watch.reference),
                poses.position(watch.primary),
                poses.position(watch.secondary),
            ) else {
                continue;
            };
            let aligned = is_aligned(reference, primary, secondary, threshold);
            if aligned && !watch.was_aligned {
                fired.push(watch.message.clone());
            }
            watch.was_aligned = aligned;
        }
        fired
    }
}
