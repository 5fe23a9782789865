//! Nearest-hit resolution for pointer picks.
//!
//! Each body owns one or more pick volumes (its sphere, ring disk and highlight
//! shell). A hit on any volume resolves to the owning body. Labels are tested in
//! screen space, and only when no body volume is hit.

use bevy::math::bounding::{BoundingSphere, RayCast3d};
use bevy::prelude::*;

use crate::bodies::BodyId;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PickShape {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    /// Flat annulus, such as a planetary ring.
    Disk {
        center: Vec3,
        normal: Dir3,
        inner_radius: f32,
        outer_radius: f32,
    },
}

impl PickShape {
    /// Distance along `ray` to the first point of the shape, if any.
    pub fn intersect(&self, ray: Ray3d) -> Option<f32> {
        match *self {
            PickShape::Sphere { center, radius } => RayCast3d::from_ray(ray, f32::MAX)
                .sphere_intersection_at(&BoundingSphere::new(center, radius)),
            PickShape::Disk {
                center,
                normal,
                inner_radius,
                outer_radius,
            } => {
                let distance = ray.intersect_plane(center, InfinitePlane3d { normal })?;
                let radial = ray.get_point(distance).distance(center);
                (inner_radius..=outer_radius)
                    .contains(&radial)
                    .then_some(distance)
            }
        }
    }
}

/// What a pick volume belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VolumeRole {
    Body,
    Ring,
    Highlight,
    Label,
}

/// Result of a successful pick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickHit {
    pub body: BodyId,
    /// The volume that was hit; always resolved to `body`.
    pub role: VolumeRole,
    /// World distance from the camera to the hit.
    pub distance: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickVolume {
    pub owner: BodyId,
    pub role: VolumeRole,
    pub shape: PickShape,
}

/// On-screen rectangle of a visible label, in logical viewport pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LabelTarget {
    pub owner: BodyId,
    pub rect: Rect,
    /// World distance from the camera to the label's anchor.
    pub distance: f32,
}

impl LabelTarget {
    /// A label text node whose top-left corner sits on `anchor`.
    pub fn at_anchor(owner: BodyId, anchor: Vec2, size: Vec2, distance: f32) -> Self {
        Self {
            owner,
            rect: Rect::from_corners(anchor, anchor + size),
            distance,
        }
    }
}

/// Everything the resolver can hit, in registry order.
#[derive(Debug, Default, Clone)]
pub struct PickScene {
    pub volumes: Vec<PickVolume>,
    pub labels: Vec<LabelTarget>,
}

impl PickScene {
    pub fn push_volume(&mut self, owner: BodyId, role: VolumeRole, shape: PickShape) {
        self.volumes.push(PickVolume { owner, role, shape });
    }

    pub fn push_label(&mut self, label: LabelTarget) {
        self.labels.push(label);
    }
}

/// Resolve a pointer to the closest body, or `None`.
///
/// `ray` is the camera ray through the pointer and `cursor` the same pointer in
/// viewport pixels. Body volumes win over labels. Among candidates the smallest
/// distance wins; an exact tie keeps the one that comes first in registry order.
pub fn resolve(ray: Ray3d, cursor: Vec2, scene: &PickScene) -> Option<PickHit> {
    let body_hit = nearest(scene.volumes.iter().map(|volume| {
        volume.shape.intersect(ray).map(|distance| PickHit {
            body: volume.owner,
            role: volume.role,
            distance,
        })
    }));
    if body_hit.is_some() {
        return body_hit;
    }

    nearest(scene.labels.iter().map(|label| {
        label.rect.contains(cursor).then_some(PickHit {
            body: label.owner,
            role: VolumeRole::Label,
            distance: label.distance,
        })
    }))
}

fn nearest(hits: impl Iterator<Item = Option<PickHit>>) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;
    for hit in hits.flatten() {
        if best.is_none_or(|b| hit.distance < b.distance) {
            best = Some(hit);
        }
    }
    best
}
