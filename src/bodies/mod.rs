//! Body registry module
//!
//! Static catalog of the star, its planets and their moons, flattened into an
//! id-indexed arena at startup.

pub mod catalog;
pub mod registry;

pub use catalog::{BodyDef, SUN};
pub use registry::{BodyId, BodyKind, BodyRegistry, CelestialBody, Orbit};
