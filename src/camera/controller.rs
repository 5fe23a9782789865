//! Camera controller state machine
//!
//! The controller owns the logical camera pose (position + look-at point) and
//! decides how it moves each tick:
//! - `Free`: WASD moves camera and look-at together; the orbit rig handles
//!   orbit/pan/zoom.
//! - `Following`: the look-at point tracks the followed body. The camera keeps
//!   whatever offset from the look-at point it has at the start of the tick, so
//!   orbit/zoom applied by the user while following is preserved.
//! - `ZoomTransition`: eases toward a close-up of the followed body, then hands
//!   control back to the steady mode that was active before.

use bevy::prelude::*;

use crate::bodies::BodyId;
use crate::core::CoreError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CameraMode {
    Free,
    Following,
    ZoomTransition,
}

/// How the pose changed since the rig was last written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum PoseChange {
    #[default]
    None,
    /// Camera and look-at moved by the same delta.
    Retarget,
    /// Camera placed explicitly; the rig must adopt position and look-at as-is.
    Snap,
}

/// Continuous movement keys held during this tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MovementInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementInput {
    fn axes(&self) -> (f32, f32) {
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
        (axis(self.forward, self.back), axis(self.right, self.left))
    }
}

/// Camera tuning values
#[derive(Resource, Clone, Debug)]
pub struct CameraConfig {
    pub default_position: Vec3,
    pub default_look_at: Vec3,
    /// Camera offset from a freshly selected body (above and behind).
    pub follow_offset: Vec3,
    /// Free-flight speed in render units per second.
    pub move_speed: f32,
    /// Fraction of the remaining distance covered per zoom tick.
    pub zoom_blend: f32,
    /// Remaining distance at which a zoom transition completes.
    pub zoom_epsilon: f32,
    /// Close-up distance in body radii.
    pub zoom_radius_factor: f32,
    /// Close-up distance floor for very small bodies.
    pub zoom_min_distance: f32,
    pub fov_y: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_position: Vec3::new(0.0, 100.0, 200.0),
            default_look_at: Vec3::ZERO,
            follow_offset: Vec3::new(0.0, 20.0, 50.0),
            move_speed: 300.0,
            zoom_blend: 0.05,
            zoom_epsilon: 0.01,
            zoom_radius_factor: 4.0,
            zoom_min_distance: 0.2,
            fov_y: 75f32.to_radians(),
        }
    }
}

/// In-flight zoom, expressed relative to the followed body.
#[derive(Copy, Clone, Debug, PartialEq)]
struct ZoomTransition {
    /// Camera offset from the body at the end of the transition.
    goal_offset: Vec3,
    /// Current camera offset from the body.
    camera_offset: Vec3,
    /// Current look-at offset from the body; eases to zero.
    focus_offset: Vec3,
    /// Steady mode to return to.
    resume: CameraMode,
}

#[derive(Resource, Debug, Clone)]
pub struct CameraController {
    position: Vec3,
    look_at: Vec3,
    mode: CameraMode,
    offset: Vec3,
    followed: Option<BodyId>,
    zoom: Option<ZoomTransition>,
    change: PoseChange,
    config: CameraConfig,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            position: config.default_position,
            look_at: config.default_look_at,
            mode: CameraMode::Free,
            offset: config.default_position - config.default_look_at,
            followed: None,
            zoom: None,
            change: PoseChange::Snap,
            config,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Camera-to-target vector from the last follow update.
    #[cfg(test)]
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn followed(&self) -> Option<BodyId> {
        self.followed
    }

    /// True while tracking is on, including a zoom that will resume following.
    pub fn is_following(&self) -> bool {
        match self.mode {
            CameraMode::Following => true,
            CameraMode::ZoomTransition => {
                self.zoom.is_some_and(|z| z.resume == CameraMode::Following)
            }
            CameraMode::Free => false,
        }
    }

    /// Adopt the pose the orbit rig actually rendered last frame.
    ///
    /// Ignored while a snap is still waiting to be written to the rig.
    pub fn sync_from_rig(&mut self, position: Vec3, look_at: Vec3) {
        if self.change == PoseChange::Snap || self.mode == CameraMode::ZoomTransition {
            return;
        }
        self.position = position;
        self.look_at = look_at;
    }

    /// Start following `body`, which currently sits at `target`.
    ///
    /// Cancels any zoom in flight and snaps to the default follow offset.
    pub fn follow(&mut self, body: BodyId, target: Vec3) {
        self.zoom = None;
        self.followed = Some(body);
        self.mode = CameraMode::Following;
        self.offset = self.config.follow_offset;
        self.position = target + self.offset;
        self.look_at = target;
        self.mark(PoseChange::Snap);
    }

    /// Flip tracking of the remembered body without moving the camera.
    ///
    /// Returns the new tracking state, or `NoSelection` if nothing was followed.
    pub fn toggle_follow(&mut self) -> Result<bool, CoreError> {
        if self.followed.is_none() {
            return Err(CoreError::NoSelection);
        }
        match self.mode {
            CameraMode::Following => self.mode = CameraMode::Free,
            CameraMode::Free => self.mode = CameraMode::Following,
            CameraMode::ZoomTransition => {
                if let Some(zoom) = self.zoom.as_mut() {
                    zoom.resume = match zoom.resume {
                        CameraMode::Following => CameraMode::Free,
                        _ => CameraMode::Following,
                    };
                }
            }
        }
        Ok(self.is_following())
    }

    /// Stop tracking and forget the followed body. The pose is unchanged.
    pub fn stop_following(&mut self) {
        self.zoom = None;
        self.followed = None;
        self.mode = CameraMode::Free;
    }

    /// Ease toward a close-up of the followed body at `target`.
    ///
    /// Larger bodies get a larger approach distance.
    pub fn zoom_to_followed(&mut self, target: Vec3, body_radius: f32) -> Result<(), CoreError> {
        if self.followed.is_none() {
            return Err(CoreError::NoSelection);
        }
        let approach = (body_radius * self.config.zoom_radius_factor).max(self.config.zoom_min_distance);
        let direction = (self.position - target)
            .try_normalize()
            .or_else(|| self.config.follow_offset.try_normalize())
            .unwrap_or(Vec3::Z);
        let resume = match (self.mode, self.zoom) {
            (CameraMode::ZoomTransition, Some(zoom)) => zoom.resume,
            (mode, _) => mode,
        };
        self.zoom = Some(ZoomTransition {
            goal_offset: direction * approach,
            camera_offset: self.position - target,
            focus_offset: self.look_at - target,
            resume,
        });
        self.mode = CameraMode::ZoomTransition;
        Ok(())
    }

    /// Return to the startup pose in free mode, forgetting any followed body.
    pub fn reset(&mut self) {
        self.zoom = None;
        self.followed = None;
        self.mode = CameraMode::Free;
        self.position = self.config.default_position;
        self.look_at = self.config.default_look_at;
        self.offset = self.position - self.look_at;
        self.mark(PoseChange::Snap);
    }

    /// Advance one tick. `target` is the followed body's current world
    /// position, if any.
    pub fn update(&mut self, target: Option<Vec3>, input: MovementInput, dt: f32) {
        match self.mode {
            CameraMode::Free => self.update_free(input, dt),
            CameraMode::Following => {
                if let Some(target) = target {
                    self.update_following(target);
                }
            }
            CameraMode::ZoomTransition => {
                if let Some(target) = target {
                    self.update_zoom(target);
                }
            }
        }
    }

    /// Take the pending pose change, resetting it to `None`.
    pub fn take_change(&mut self) -> PoseChange {
        std::mem::take(&mut self.change)
    }

    fn mark(&mut self, change: PoseChange) {
        self.change = self.change.max(change);
    }

    fn update_free(&mut self, input: MovementInput, dt: f32) {
        let (forward_axis, right_axis) = input.axes();
        if forward_axis == 0.0 && right_axis == 0.0 {
            return;
        }
        let forward = (self.look_at - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let delta = (forward * forward_axis + right * right_axis) * self.config.move_speed * dt;
        self.position += delta;
        self.look_at += delta;
        self.mark(PoseChange::Retarget);
    }

    fn update_following(&mut self, target: Vec3) {
        let offset = self.position - self.look_at;
        self.offset = if offset.length_squared() > f32::EPSILON {
            offset
        } else {
            self.config.follow_offset
        };
        self.position = target + self.offset;
        self.look_at = target;
        self.mark(PoseChange::Retarget);
    }

    fn update_zoom(&mut self, target: Vec3) {
        let Some(mut zoom) = self.zoom else {
            self.mode = CameraMode::Free;
            return;
        };
        let blend = self.config.zoom_blend;
        zoom.camera_offset += (zoom.goal_offset - zoom.camera_offset) * blend;
        zoom.focus_offset -= zoom.focus_offset * blend;

        let done = zoom.goal_offset.distance(zoom.camera_offset) < self.config.zoom_epsilon
            && zoom.focus_offset.length() < self.config.zoom_epsilon;
        if done {
            zoom.camera_offset = zoom.goal_offset;
            zoom.focus_offset = Vec3::ZERO;
        }

        self.position = target + zoom.camera_offset;
        self.look_at = target + zoom.focus_offset;
        self.offset = zoom.camera_offset;
        self.mark(PoseChange::Snap);

        if done {
            self.zoom = None;
            self.mode = zoom.resume;
            debug!("Zoom transition finished, resuming {:?}", self.mode);
        } else {
            self.zoom = Some(zoom);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;
    const STILL: MovementInput = MovementInput {
        forward: false,
        back: false,
        left: false,
        right: false,
    };

    fn following(target: Vec3) -> CameraController {
        let mut cam = CameraController::default();
        cam.follow(BodyId(3), target);
        cam.take_change();
        cam
    }

    #[test]
    fn test_starts_free_at_default_pose() {
        let cam = CameraController::default();
        assert_eq!(cam.mode(), CameraMode::Free);
        assert_eq!(cam.position(), Vec3::new(0.0, 100.0, 200.0));
        assert_eq!(cam.look_at(), Vec3::ZERO);
        assert!(cam.followed().is_none());
    }

    #[test]
    fn test_follow_snaps_to_default_offset() {
        let mut cam = CameraController::default();
        let target = Vec3::new(50.0, 0.0, 0.0);
        cam.follow(BodyId(3), target);
        assert_eq!(cam.mode(), CameraMode::Following);
        assert_eq!(cam.position(), target + Vec3::new(0.0, 20.0, 50.0));
        assert_eq!(cam.look_at(), target);
        assert_eq!(cam.take_change(), PoseChange::Snap);
        assert_eq!(cam.take_change(), PoseChange::None);
    }

    #[test]
    fn test_following_preserves_distance_across_ticks() {
        let mut cam = following(Vec3::new(50.0, 0.0, 0.0));
        let mut previous = cam.position().distance(cam.look_at());
        for tick in 1..200 {
            let angle = tick as f32 * 0.01;
            let target = Vec3::new(50.0 * angle.cos(), 0.0, 50.0 * angle.sin());
            cam.update(Some(target), STILL, 1.0 / 60.0);
            let distance = cam.position().distance(target);
            assert!((distance - previous).abs() < EPSILON, "tick {tick}");
            assert_eq!(cam.look_at(), target);
            previous = distance;
        }
        assert_eq!(cam.take_change(), PoseChange::Retarget);
    }

    #[test]
    fn test_following_keeps_user_zoom_and_orbit() {
        let target = Vec3::new(10.0, 0.0, 0.0);
        let mut cam = following(target);

        // The user dollies in and orbits around the body via the rig.
        let user_offset = Vec3::new(7.0, 1.0, -3.0);
        cam.sync_from_rig(target + user_offset, target);

        let moved = Vec3::new(12.0, 0.0, 4.0);
        cam.update(Some(moved), STILL, 1.0 / 60.0);
        assert!((cam.position() - (moved + user_offset)).length() < EPSILON);
        assert!((cam.offset() - user_offset).length() < EPSILON);
    }

    #[test]
    fn test_following_with_camera_on_target_uses_default_offset() {
        let target = Vec3::new(1.0, 2.0, 3.0);
        let mut cam = following(target);
        cam.sync_from_rig(target, target);
        cam.update(Some(target), STILL, 1.0 / 60.0);
        assert!(cam.position().is_finite());
        assert_eq!(cam.position(), target + CameraConfig::default().follow_offset);
    }

    #[test]
    fn test_toggle_requires_a_remembered_body() {
        let mut cam = CameraController::default();
        assert_eq!(cam.toggle_follow(), Err(CoreError::NoSelection));
        assert_eq!(cam.mode(), CameraMode::Free);
    }

    #[test]
    fn test_toggle_flips_without_moving() {
        let mut cam = following(Vec3::new(5.0, 0.0, 0.0));
        let pose = (cam.position(), cam.look_at());

        assert_eq!(cam.toggle_follow(), Ok(false));
        assert_eq!(cam.mode(), CameraMode::Free);
        assert_eq!((cam.position(), cam.look_at()), pose);
        assert_eq!(cam.followed(), Some(BodyId(3)));

        assert_eq!(cam.toggle_follow(), Ok(true));
        assert_eq!(cam.mode(), CameraMode::Following);
        assert_eq!((cam.position(), cam.look_at()), pose);
        assert_eq!(cam.take_change(), PoseChange::None);
    }

    #[test]
    fn test_free_mode_ignores_target() {
        let mut cam = following(Vec3::new(5.0, 0.0, 0.0));
        cam.toggle_follow().unwrap();
        let pose = (cam.position(), cam.look_at());
        cam.update(Some(Vec3::new(100.0, 0.0, 0.0)), STILL, 1.0 / 60.0);
        assert_eq!((cam.position(), cam.look_at()), pose);
    }

    #[test]
    fn test_free_movement_translates_camera_and_look_at() {
        let mut cam = CameraController::default();
        cam.take_change();
        let start = (cam.position(), cam.look_at());
        let input = MovementInput {
            forward: true,
            ..Default::default()
        };
        cam.update(None, input, 0.5);

        let forward = (start.1 - start.0).normalize();
        let delta = cam.position() - start.0;
        assert!((delta - forward * 150.0).length() < 1e-2);
        assert!((cam.look_at() - start.1 - delta).length() < 1e-3);
        assert_eq!(cam.take_change(), PoseChange::Retarget);
    }

    #[test]
    fn test_free_strafe_right_is_screen_right() {
        let mut cam = CameraController::new(CameraConfig {
            default_position: Vec3::new(0.0, 0.0, 10.0),
            ..Default::default()
        });
        let input = MovementInput {
            right: true,
            ..Default::default()
        };
        cam.update(None, input, 0.1);
        assert!(cam.position().x > 0.0);
    }

    #[test]
    fn test_movement_keys_ignored_while_following() {
        let target = Vec3::new(5.0, 0.0, 0.0);
        let mut cam = following(target);
        let pose = cam.position();
        let input = MovementInput {
            forward: true,
            left: true,
            ..Default::default()
        };
        cam.update(Some(target), input, 1.0);
        assert_eq!(cam.position(), pose);
    }

    #[test]
    fn test_zoom_requires_followed_body() {
        let mut cam = CameraController::default();
        assert_eq!(
            cam.zoom_to_followed(Vec3::ZERO, 1.0),
            Err(CoreError::NoSelection)
        );
        assert_eq!(cam.mode(), CameraMode::Free);
    }

    #[test]
    fn test_zoom_converges_and_resumes_following() {
        let mut cam = following(Vec3::ZERO);
        cam.zoom_to_followed(Vec3::ZERO, 3.48).unwrap();
        assert_eq!(cam.mode(), CameraMode::ZoomTransition);
        assert!(cam.is_following());

        let mut ticks = 0;
        let mut target = Vec3::ZERO;
        while cam.mode() == CameraMode::ZoomTransition {
            // The body keeps moving during the transition.
            target += Vec3::new(0.3, 0.0, 0.1);
            cam.update(Some(target), STILL, 1.0 / 60.0);
            ticks += 1;
            assert!(ticks < 1000, "zoom never finished");
        }

        assert_eq!(cam.mode(), CameraMode::Following);
        let distance = cam.position().distance(target);
        assert!((distance - 3.48 * 4.0).abs() < 1e-3);
        assert_eq!(cam.look_at(), target);
    }

    #[test]
    fn test_zoom_distance_grows_with_body_size() {
        let approach = |radius: f32| {
            let mut cam = following(Vec3::ZERO);
            cam.zoom_to_followed(Vec3::ZERO, radius).unwrap();
            while cam.mode() == CameraMode::ZoomTransition {
                cam.update(Some(Vec3::ZERO), STILL, 1.0 / 60.0);
            }
            cam.position().length()
        };
        let tiny = approach(0.0001);
        let large = approach(3.0);
        assert!((tiny - 0.2).abs() < 1e-3);
        assert!(large > tiny);
    }

    #[test]
    fn test_zoom_from_free_returns_to_free() {
        let mut cam = following(Vec3::ZERO);
        cam.toggle_follow().unwrap();
        cam.zoom_to_followed(Vec3::ZERO, 1.0).unwrap();
        assert!(!cam.is_following());
        while cam.mode() == CameraMode::ZoomTransition {
            cam.update(Some(Vec3::ZERO), STILL, 1.0 / 60.0);
        }
        assert_eq!(cam.mode(), CameraMode::Free);
    }

    #[test]
    fn test_selection_interrupts_zoom() {
        let mut cam = following(Vec3::ZERO);
        cam.zoom_to_followed(Vec3::ZERO, 1.0).unwrap();
        cam.update(Some(Vec3::ZERO), STILL, 1.0 / 60.0);

        let other = Vec3::new(30.0, 0.0, 0.0);
        cam.follow(BodyId(5), other);
        assert_eq!(cam.mode(), CameraMode::Following);
        assert_eq!(cam.followed(), Some(BodyId(5)));
        assert_eq!(cam.position(), other + CameraConfig::default().follow_offset);
    }

    #[test]
    fn test_reset_interrupts_zoom_and_clears_follow() {
        let mut cam = following(Vec3::new(9.0, 0.0, 0.0));
        cam.zoom_to_followed(Vec3::new(9.0, 0.0, 0.0), 1.0).unwrap();
        cam.reset();
        assert_eq!(cam.mode(), CameraMode::Free);
        assert!(cam.followed().is_none());
        assert_eq!(cam.position(), Vec3::new(0.0, 100.0, 200.0));
        assert_eq!(cam.look_at(), Vec3::ZERO);
        assert_eq!(cam.take_change(), PoseChange::Snap);
    }

    #[test]
    fn test_stop_following_keeps_pose() {
        let mut cam = following(Vec3::new(9.0, 0.0, 0.0));
        let pose = (cam.position(), cam.look_at());
        cam.stop_following();
        assert_eq!(cam.mode(), CameraMode::Free);
        assert!(cam.followed().is_none());
        assert_eq!((cam.position(), cam.look_at()), pose);
    }

    #[test]
    fn test_rig_sync_ignored_until_snap_is_written() {
        let mut cam = CameraController::default();
        cam.follow(BodyId(1), Vec3::ZERO);
        cam.sync_from_rig(Vec3::splat(99.0), Vec3::splat(98.0));
        assert_eq!(cam.look_at(), Vec3::ZERO);

        cam.take_change();
        cam.sync_from_rig(Vec3::splat(99.0), Vec3::splat(98.0));
        assert_eq!(cam.look_at(), Vec3::splat(98.0));
    }
}
