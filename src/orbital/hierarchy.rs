//! Parent-relative transform composition.

use bevy::prelude::*;

use crate::bodies::{BodyId, BodyRegistry, CelestialBody};
use crate::orbital::kinematics::{AxialSpin, orbital_angle, orbital_offset};
use crate::orbital::SimulationTime;

/// Position and spin of one body in the star's reference frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WorldPose {
    pub position: Vec3,
    /// Axial rotation about +Y in radians.
    pub rotation: f32,
}

/// World poses for every body, indexed by `BodyId`. Rebuilt every tick.
#[derive(Resource, Debug, Default, Clone)]
pub struct WorldPoses {
    poses: Vec<WorldPose>,
}

impl WorldPoses {
    pub fn get(&self, id: BodyId) -> Option<&WorldPose> {
        self.poses.get(id.index())
    }

    pub fn position(&self, id: BodyId) -> Option<Vec3> {
        self.get(id).map(|pose| pose.position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &WorldPose)> {
        self.poses
            .iter()
            .enumerate()
            .map(|(index, pose)| (BodyId(index), pose))
    }

    /// Recompute every pose from the clock, resolving parents before children.
    ///
    /// `origin` is the star's world position. Composition walks the tree from
    /// the root, so depth is not fixed.
    pub fn recompute(
        &mut self,
        registry: &BodyRegistry,
        elapsed: f64,
        orbit_rate: f64,
        spin: &AxialSpin,
        origin: Vec3,
    ) {
        self.poses.clear();
        self.poses.resize(registry.len(), WorldPose::default());

        let mut stack = vec![(registry.root(), origin)];
        while let Some((id, parent_position)) = stack.pop() {
            let Some(body) = registry.get(id) else {
                continue;
            };
            let position = compose_with_parent(parent_position, body, elapsed, orbit_rate);
            self.poses[id.index()] = WorldPose {
                position,
                rotation: spin.angle(id.index()),
            };
            stack.extend(body.children.iter().rev().map(|child| (*child, position)));
        }
    }
}

/// World position of `body` given its parent's world position.
pub fn compose_with_parent(
    parent_position: Vec3,
    body: &CelestialBody,
    elapsed: f64,
    orbit_rate: f64,
) -> Vec3 {
    match body.orbit {
        Some(orbit) => {
            let angle = orbital_angle(elapsed, orbit_rate, orbit.period_days);
            parent_position + orbital_offset(orbit.render_radius, angle)
        }
        None => parent_position,
    }
}

/// System to rebuild world poses from the current clock
pub fn update_world_poses(
    registry: Res<BodyRegistry>,
    sim_time: Res<SimulationTime>,
    spin: Res<AxialSpin>,
    mut poses: ResMut<WorldPoses>,
) {
    poses.recompute(
        &registry,
        sim_time.elapsed(),
        sim_time.orbit_rate(),
        &spin,
        Vec3::ZERO,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::SUN;
    use crate::core::space::DISTANCE_SCALE;
    use crate::orbital::time::ORBIT_RATE;

    const EPSILON: f32 = 1e-3;

    fn setup() -> (BodyRegistry, AxialSpin) {
        let registry = BodyRegistry::from_catalog(&SUN).unwrap();
        let spin = AxialSpin::new(registry.len());
        (registry, spin)
    }

    fn poses_at(registry: &BodyRegistry, spin: &AxialSpin, t: f64, origin: Vec3) -> WorldPoses {
        let mut poses = WorldPoses::default();
        poses.recompute(registry, t, ORBIT_RATE, spin, origin);
        poses
    }

    #[test]
    fn test_star_sits_at_origin() {
        let (registry, spin) = setup();
        let poses = poses_at(&registry, &spin, 17.0, Vec3::ZERO);
        assert_eq!(poses.position(registry.root()), Some(Vec3::ZERO));
    }

    #[test]
    fn test_earth_starts_on_x_axis() {
        let (registry, spin) = setup();
        let poses = poses_at(&registry, &spin, 0.0, Vec3::ZERO);
        let earth = registry.find_by_name("Earth").unwrap();
        let expected = Vec3::new(DISTANCE_SCALE as f32, 0.0, 0.0);
        assert!((poses.position(earth).unwrap() - expected).length() < EPSILON);
    }

    #[test]
    fn test_moon_is_composed_on_its_planet() {
        let (registry, spin) = setup();
        let t = 3.7;
        let poses = poses_at(&registry, &spin, t, Vec3::ZERO);

        let earth_id = registry.find_by_name("Earth").unwrap();
        let moon_id = registry.find_by_name("Moon").unwrap();
        let moon = registry.get(moon_id).unwrap();
        let orbit = moon.orbit.unwrap();

        let local = orbital_offset(
            orbit.render_radius,
            orbital_angle(t, ORBIT_RATE, orbit.period_days),
        );
        let expected = poses.position(earth_id).unwrap() + local;
        assert!((poses.position(moon_id).unwrap() - expected).length() < EPSILON);

        let separation = poses
            .position(moon_id)
            .unwrap()
            .distance(poses.position(earth_id).unwrap());
        assert!((separation - orbit.render_radius as f32).abs() < EPSILON);
    }

    #[test]
    fn test_moving_the_origin_translates_every_body() {
        let (registry, spin) = setup();
        let delta = Vec3::new(12.0, -3.0, 7.5);
        let base = poses_at(&registry, &spin, 99.0, Vec3::ZERO);
        let shifted = poses_at(&registry, &spin, 99.0, delta);
        for ((_, a), (_, b)) in base.iter().zip(shifted.iter()) {
            assert!((b.position - a.position - delta).length() < EPSILON);
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let (registry, spin) = setup();
        let mut poses = poses_at(&registry, &spin, 55.5, Vec3::ZERO);
        let first = poses.clone();
        poses.recompute(&registry, 55.5, ORBIT_RATE, &spin, Vec3::ZERO);
        for ((_, a), (_, b)) in first.iter().zip(poses.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_planet_ignores_sibling_moons() {
        let (registry, spin) = setup();
        let poses = poses_at(&registry, &spin, 12.0, Vec3::ZERO);
        let mars_id = registry.find_by_name("Mars").unwrap();
        let mars = registry.get(mars_id).unwrap();

        // Mars composed in isolation from the star matches the full pass.
        let alone = compose_with_parent(Vec3::ZERO, mars, 12.0, ORBIT_RATE);
        assert_eq!(poses.position(mars_id), Some(alone));
    }

    #[test]
    fn test_pose_carries_spin() {
        let (registry, mut spin) = setup();
        spin.advance(&registry, 1.0, 3600.0);
        let poses = poses_at(&registry, &spin, 0.0, Vec3::ZERO);
        let earth = registry.find_by_name("Earth").unwrap();
        assert!((poses.get(earth).unwrap().rotation - spin.angle(earth.index())).abs() < 1e-6);
    }
}
