//! Systems bridging the camera controller and the PanOrbit rig

use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::camera::MainCamera;
use crate::camera::controller::{CameraController, MovementInput, PoseChange};
use crate::orbital::WorldPoses;

/// Read held WASD keys for this tick.
pub fn movement_input(keys: &ButtonInput<KeyCode>) -> MovementInput {
    MovementInput {
        forward: keys.pressed(KeyCode::KeyW),
        back: keys.pressed(KeyCode::KeyS),
        left: keys.pressed(KeyCode::KeyA),
        right: keys.pressed(KeyCode::KeyD),
    }
}

/// Yaw, pitch and radius of a camera sitting at `offset` from its focus.
pub fn orbit_angles(offset: Vec3) -> Option<(f32, f32, f32)> {
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return None;
    }
    let yaw = offset.x.atan2(offset.z);
    let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
    Some((yaw, pitch, radius))
}

/// System to pull the pose the rig rendered last frame into the controller
pub fn sync_controller_from_rig(
    mut controller: ResMut<CameraController>,
    cameras: Query<(&Transform, &PanOrbitCamera), With<MainCamera>>,
) {
    let Ok((transform, pan_orbit)) = cameras.single() else {
        return;
    };
    controller.sync_from_rig(transform.translation, pan_orbit.focus);
}

/// System to advance the controller state machine by one tick
pub fn update_camera_controller(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    poses: Res<WorldPoses>,
    mut controller: ResMut<CameraController>,
) {
    let target = controller.followed().and_then(|id| poses.position(id));
    controller.update(target, movement_input(&keys), time.delta_secs());
}

/// System to push the controller pose into the PanOrbit rig
///
/// A retarget moves only the focus so user zoom and orbit survive. A snap
/// places the camera explicitly, the same way a satellite jump does.
pub fn write_controller_to_rig(
    mut controller: ResMut<CameraController>,
    mut cameras: Query<(&mut PanOrbitCamera, &mut Transform), With<MainCamera>>,
) {
    let change = controller.take_change();
    if change == PoseChange::None {
        return;
    }
    let Ok((mut poc, mut cam_transform)) = cameras.single_mut() else {
        warn!("write_controller_to_rig: main camera not found");
        return;
    };

    let look_at = controller.look_at();
    poc.focus = look_at;
    poc.target_focus = look_at;

    if change == PoseChange::Snap
        && let Some((yaw, pitch, radius)) = orbit_angles(controller.position() - look_at)
    {
        poc.target_radius = radius;
        poc.target_pitch = pitch;
        poc.target_yaw = yaw;
        poc.radius = Some(radius);
        poc.pitch = Some(pitch);
        poc.yaw = Some(yaw);

        cam_transform.translation = controller.position();
        cam_transform.look_at(look_at, Vec3::Y);
    }
    poc.force_update = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_angles_rebuild_offset() {
        let offset = Vec3::new(0.0, 20.0, 50.0);
        let (yaw, pitch, radius) = orbit_angles(offset).unwrap();
        let rebuilt = Vec3::new(
            radius * pitch.cos() * yaw.sin(),
            radius * pitch.sin(),
            radius * pitch.cos() * yaw.cos(),
        );
        assert!((rebuilt - offset).length() < 1e-3);
        assert!(yaw.abs() < 1e-6);
    }

    #[test]
    fn test_orbit_angles_of_zero_offset() {
        assert!(orbit_angles(Vec3::ZERO).is_none());
    }
}
