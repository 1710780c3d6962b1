//! Mapping between real space (meters) and display space (pixels).
//!
//! Pure functions of the inputs: recomputing from the same real state and
//! settings always yields the same output, with no rounding carried across
//! calls. Display state is therefore always derivable and never stored
//! authoritatively.

use crate::settings::Settings;
use crate::vecmath::Vec2;

/// Maps a real-world position to a display-space position.
#[inline(always)]
pub fn to_display(real: Vec2, settings: &Settings, origin_offset: Vec2) -> Vec2 {
    real * settings.scale() + origin_offset
}

/// Maps a base radius (pixels at zoom 1.0) to a display radius.
#[inline(always)]
pub fn display_radius(base_radius: f64, settings: &Settings) -> f64 {
    base_radius * settings.zoom
}
