//! Bounded per-body position history

use bevy::prelude::*;
use std::collections::VecDeque;

use crate::bodies::BodyId;

/// Default number of samples kept per body.
pub const TRAIL_CAPACITY: usize = 100;

/// Ring buffers of recent world positions, one per tracked body.
///
/// Buffers are created the first time a sample is recorded for a body. While
/// recording is disabled nothing is appended and existing samples are kept, so
/// re-enabling continues from the old history.
#[derive(Resource, Debug)]
pub struct TrailHistory {
    enabled: bool,
    capacity: usize,
    buffers: Vec<Option<VecDeque<Vec3>>>,
}

impl Default for TrailHistory {
    fn default() -> Self {
        Self::with_capacity(TRAIL_CAPACITY)
    }
}

impl TrailHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            enabled: false,
            capacity: capacity.max(1),
            buffers: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_recording_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Append a sample, evicting the oldest once the buffer is full.
    pub fn record_sample(&mut self, body: BodyId, position: Vec3) {
        if !self.enabled {
            return;
        }
        let index = body.index();
        if self.buffers.len() <= index {
            self.buffers.resize_with(index + 1, || None);
        }
        let capacity = self.capacity;
        let buffer = self.buffers[index].get_or_insert_with(|| VecDeque::with_capacity(capacity));
        if buffer.len() == capacity {
            buffer.pop_front();
        }
        buffer.push_back(position);
    }

    /// Samples for `body`, oldest first.
    pub fn samples(&self, body: BodyId) -> impl Iterator<Item = Vec3> + '_ {
        self.buffers
            .get(body.index())
            .and_then(Option::as_ref)
            .into_iter()
            .flat_map(|buffer| buffer.iter().copied())
    }

    pub fn len(&self, body: BodyId) -> usize {
        self.buffers
            .get(body.index())
            .and_then(Option::as_ref)
            .map_or(0, VecDeque::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(i: usize) -> Vec3 {
        Vec3::new(i as f32, 0.0, 0.0)
    }

    #[test]
    fn test_disabled_by_default_and_lazy() {
        let mut trails = TrailHistory::default();
        trails.record_sample(BodyId(3), point(1));
        assert_eq!(trails.len(BodyId(3)), 0);
        assert_eq!(trails.samples(BodyId(3)).count(), 0);
    }

    #[test]
    fn test_buffer_never_exceeds_capacity() {
        let mut trails = TrailHistory::default();
        trails.set_recording_enabled(true);
        for n in 0..350 {
            trails.record_sample(BodyId(1), point(n));
            assert!(trails.len(BodyId(1)) <= TRAIL_CAPACITY);
        }

        let samples: Vec<_> = trails.samples(BodyId(1)).collect();
        let expected: Vec<_> = (250..350).map(point).collect();
        assert_eq!(samples, expected);
    }

    #[test]
    fn test_short_history_is_kept_in_order() {
        let mut trails = TrailHistory::default();
        trails.set_recording_enabled(true);
        for n in 0..7 {
            trails.record_sample(BodyId(0), point(n));
        }
        let samples: Vec<_> = trails.samples(BodyId(0)).collect();
        assert_eq!(samples, (0..7).map(point).collect::<Vec<_>>());
    }

    #[test]
    fn test_disabling_keeps_existing_samples() {
        let mut trails = TrailHistory::default();
        trails.set_recording_enabled(true);
        trails.record_sample(BodyId(2), point(1));
        trails.record_sample(BodyId(2), point(2));

        trails.set_recording_enabled(false);
        trails.record_sample(BodyId(2), point(3));
        assert_eq!(trails.len(BodyId(2)), 2);

        trails.set_recording_enabled(true);
        trails.record_sample(BodyId(2), point(4));
        let samples: Vec<_> = trails.samples(BodyId(2)).collect();
        assert_eq!(samples, vec![point(1), point(2), point(4)]);
    }

    #[test]
    fn test_bodies_do_not_share_buffers() {
        let mut trails = TrailHistory::with_capacity(3);
        trails.set_recording_enabled(true);
        trails.record_sample(BodyId(0), point(0));
        trails.record_sample(BodyId(5), point(5));
        assert_eq!(trails.len(BodyId(0)), 1);
        assert_eq!(trails.len(BodyId(5)), 1);
        assert_eq!(trails.len(BodyId(2)), 0);
    }
}
