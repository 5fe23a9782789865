//! Visualization configuration

use bevy::prelude::*;

/// Scene rendering configuration resource
#[derive(Resource, Clone, Debug)]
pub struct SceneConfig {
    /// Highlight shell radius as a multiple of the body radius.
    pub highlight_factor: f32,
    /// Ring inner/outer radius as multiples of the body radius.
    pub ring_inner_factor: f32,
    pub ring_outer_factor: f32,
    /// Label height above the body surface, in render units.
    pub label_lift: f32,
    /// Half-width of an orbit guide annulus.
    pub planet_orbit_half_width: f32,
    pub moon_orbit_half_width: f32,
    pub orbit_guide_alpha: f32,
    pub star_light_intensity: f32,
    pub ambient_brightness: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            highlight_factor: 1.2,
            ring_inner_factor: 1.2,
            ring_outer_factor: 1.5,
            label_lift: 1.0,
            planet_orbit_half_width: 0.1,
            moon_orbit_half_width: 0.05,
            orbit_guide_alpha: 0.2,
            star_light_intensity: 2.0e9,
            ambient_brightness: 80.0,
        }
    }
}

/// Convert a packed `0xRRGGBB` colour into a bevy `Color`.
pub fn hex_color(rgb: u32) -> Color {
    Color::srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}
