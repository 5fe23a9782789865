//! Core types shared by every plugin
//!
//! Error taxonomy, per-frame system ordering and the mapping from catalog
//! units (km, AU) into render-space units.

pub mod error;
pub mod schedule;
pub mod space;

pub use error::CoreError;
pub use schedule::TickSet;
