//! Catalog units to render-space units.
//!
//! The catalog stores radii in km and orbital distances in AU (star-relative).
//! Render space is an arbitrary unit where 1 AU = `DISTANCE_SCALE`. Moon orbits
//! are exaggerated so they stay visible next to their parent at that scale.

use crate::bodies::BodyKind;

/// Render units per km of body radius.
pub const SIZE_SCALE: f64 = 0.000_005;
/// Render units per AU of orbital distance.
pub const DISTANCE_SCALE: f64 = 50.0;
/// Extra multiplier applied to moon orbital distances.
pub const MOON_DISTANCE_BOOST: f64 = 100.0;

/// Rendered sphere radius for a body of the given mean radius.
pub fn render_radius(radius_km: f64) -> f32 {
    (radius_km * SIZE_SCALE) as f32
}

/// Rendered orbit radius around the parent.
pub fn render_orbit_radius(distance_au: f64, kind: BodyKind) -> f64 {
    match kind {
        BodyKind::Star => 0.0,
        BodyKind::Planet => distance_au * DISTANCE_SCALE,
        BodyKind::Moon => distance_au * DISTANCE_SCALE * MOON_DISTANCE_BOOST,
    }
}
