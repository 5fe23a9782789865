//! Arena of celestial bodies indexed by stable integer id.

use bevy::prelude::*;
use std::collections::{HashMap, VecDeque};

use crate::bodies::catalog::BodyDef;
use crate::core::CoreError;
use crate::core::space::{render_orbit_radius, render_radius};

/// Stable index of a body in the registry. Ids follow registry insertion order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Position of a body in the star -> planet -> moon tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

impl BodyKind {
    fn from_depth(depth: usize) -> Self {
        match depth {
            0 => BodyKind::Star,
            1 => BodyKind::Planet,
            _ => BodyKind::Moon,
        }
    }
}

/// Circular orbit around the parent body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Orbit {
    pub distance_au: f64,
    pub period_days: f64,
    /// Orbit radius in render units.
    pub render_radius: f64,
}

#[derive(Clone, Debug)]
pub struct CelestialBody {
    pub id: BodyId,
    pub name: &'static str,
    pub info: &'static str,
    pub kind: BodyKind,
    pub radius_km: f64,
    /// `None` only for the root star.
    pub orbit: Option<Orbit>,
    pub rotation_period_days: Option<f64>,
    pub color: u32,
    pub has_rings: bool,
    pub parent: Option<BodyId>,
    pub children: Vec<BodyId>,
}

impl CelestialBody {
    /// Sphere radius in render units.
    pub fn render_radius(&self) -> f32 {
        render_radius(self.radius_km)
    }
}

/// Immutable body tree built once from the catalog.
///
/// Bodies are stored breadth-first, so every parent precedes its children and
/// the root star is always `BodyId(0)`.
#[derive(Resource, Debug)]
pub struct BodyRegistry {
    bodies: Vec<CelestialBody>,
    by_name: HashMap<&'static str, BodyId>,
}

impl BodyRegistry {
    pub fn from_catalog(root: &BodyDef) -> Result<Self, CoreError> {
        let mut bodies: Vec<CelestialBody> = Vec::new();
        let mut by_name = HashMap::new();
        let mut queue: VecDeque<(&BodyDef, Option<BodyId>, usize)> = VecDeque::new();
        queue.push_back((root, None, 0));

        while let Some((def, parent, depth)) = queue.pop_front() {
            let kind = BodyKind::from_depth(depth);
            validate(def, kind)?;

            let id = BodyId(bodies.len());
            if by_name.insert(def.name, id).is_some() {
                return Err(CoreError::invalid(def.name, "duplicate body name"));
            }

            let orbit = (kind != BodyKind::Star).then(|| Orbit {
                distance_au: def.distance_au,
                period_days: def.period_days,
                render_radius: render_orbit_radius(def.distance_au, kind),
            });

            bodies.push(CelestialBody {
                id,
                name: def.name,
                info: def.info,
                kind,
                radius_km: def.radius_km,
                orbit,
                rotation_period_days: def.rotation_days,
                color: def.color,
                has_rings: def.has_rings,
                parent,
                children: Vec::new(),
            });
            if let Some(parent) = parent {
                bodies[parent.index()].children.push(id);
            }

            for moon in def.moons {
                queue.push_back((moon, Some(id), depth + 1));
            }
        }

        Ok(Self { bodies, by_name })
    }

    pub fn root(&self) -> BodyId {
        BodyId(0)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.index())
    }

    /// Look up a body by exact name.
    pub fn find_by_name(&self, name: &str) -> Result<BodyId, CoreError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| CoreError::NotFound(name.to_string()))
    }

    /// Bodies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }
}

fn validate(def: &BodyDef, kind: BodyKind) -> Result<(), CoreError> {
    if def.name.trim().is_empty() {
        return Err(CoreError::invalid(def.name, "name must not be empty"));
    }
    if !(def.radius_km.is_finite() && def.radius_km > 0.0) {
        return Err(CoreError::invalid(def.name, "radius must be positive"));
    }
    if kind != BodyKind::Star {
        if !(def.distance_au.is_finite() && def.distance_au > 0.0) {
            return Err(CoreError::invalid(def.name, "orbital distance must be positive"));
        }
        if !(def.period_days.is_finite() && def.period_days > 0.0) {
            return Err(CoreError::invalid(def.name, "orbital period must be positive"));
        }
    }
    if let Some(days) = def.rotation_days
        && !(days.is_finite() && days > 0.0)
    {
        return Err(CoreError::invalid(def.name, "rotation period must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::catalog::SUN;

    fn registry() -> BodyRegistry {
        BodyRegistry::from_catalog(&SUN).unwrap()
    }

    #[test]
    fn test_catalog_builds_a_tree() {
        let reg = registry();
        assert_eq!(reg.len(), 17);

        let root = reg.get(reg.root()).unwrap();
        assert_eq!(root.name, "Sun");
        assert_eq!(root.kind, BodyKind::Star);
        assert!(root.parent.is_none());
        assert!(root.orbit.is_none());

        for body in reg.iter().skip(1) {
            let parent = body.parent.expect("non-root body without parent");
            assert!(parent < body.id, "{} is stored before its parent", body.name);
            assert!(reg.get(parent).unwrap().children.contains(&body.id));
        }
    }

    #[test]
    fn test_insertion_order_is_breadth_first() {
        let reg = registry();
        let names: Vec<_> = reg.iter().map(|b| b.name).collect();
        assert_eq!(&names[..4], &["Sun", "Mercury", "Venus", "Earth"]);
        assert_eq!(names[9], "Moon");
        assert_eq!(names[16], "Titan");
    }

    #[test]
    fn test_moon_kind_and_parent() {
        let reg = registry();
        let moon = reg.get(reg.find_by_name("Moon").unwrap()).unwrap();
        let earth = reg.find_by_name("Earth").unwrap();
        assert_eq!(moon.kind, BodyKind::Moon);
        assert_eq!(moon.parent, Some(earth));
    }

    #[test]
    fn test_find_missing_body() {
        let reg = registry();
        assert_eq!(
            reg.find_by_name("Pluto"),
            Err(CoreError::NotFound("Pluto".into()))
        );
    }

    #[test]
    fn test_zero_period_is_rejected() {
        const BAD_MOONS: &[BodyDef] = &[BodyDef::new("Bad", 10.0, 1.0, 0.0, 0xffffff)];
        let root = BodyDef::new("Star", 1000.0, 0.0, 0.0, 0xffffff).moons(BAD_MOONS);
        let err = BodyRegistry::from_catalog(&root).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfiguration { ref body, .. } if body == "Bad"));
    }

    #[test]
    fn test_negative_distance_is_rejected() {
        const BAD_MOONS: &[BodyDef] = &[BodyDef::new("Bad", 10.0, -2.0, 10.0, 0xffffff)];
        let root = BodyDef::new("Star", 1000.0, 0.0, 0.0, 0xffffff).moons(BAD_MOONS);
        assert!(matches!(
            BodyRegistry::from_catalog(&root),
            Err(CoreError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        const TWINS: &[BodyDef] = &[
            BodyDef::new("Twin", 10.0, 1.0, 10.0, 0xffffff),
            BodyDef::new("Twin", 10.0, 2.0, 20.0, 0xffffff),
        ];
        let root = BodyDef::new("Star", 1000.0, 0.0, 0.0, 0xffffff).moons(TWINS);
        assert!(BodyRegistry::from_catalog(&root).is_err());
    }
}
