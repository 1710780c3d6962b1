//! Derives an initial orbital state from classical orbital elements.
//!
//! The body is placed at either perihelion or aphelion of the requested
//! ellipse and given the tangential speed the vis-viva relation
//! `v^2 = G*M*(2/r - 1/a)` prescribes there, oriented counter-clockwise.

use crate::error::{SimError, SimResult};
use crate::vecmath::{angle_to_vec, Vec2};
use serde::{Deserialize, Serialize};

/// Classical elements for a closed (elliptical) orbit around the anchor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis_m: f64,
    /// Must lie in `[0, 1)`; only closed ellipses are supported.
    pub eccentricity: f64,
    /// Angular position of the starting point, in degrees.
    pub start_angle_deg: f64,
    /// Start at perihelion (closest approach) rather than aphelion.
    pub at_perihelion: bool,
}

/// Computes `(position, velocity)` in meters / meters-per-second for a body
/// entering the described orbit around an anchor of mass `anchor_mass`.
pub fn state_from_elements(
    g: f64,
    anchor_mass: f64,
    elements: &OrbitalElements,
) -> SimResult<(Vec2, Vec2)> {
    let a = elements.semi_major_axis_m;
    let e = elements.eccentricity;
    if anchor_mass <= 0.0 {
        return Err(SimError::InvalidOrbitalElements(format!(
            "anchor mass must be positive, got {anchor_mass}"
        )));
    }
    if a <= 0.0 {
        return Err(SimError::InvalidOrbitalElements(format!(
            "semi-major axis must be positive, got {a}"
        )));
    }
    if e < 0.0 {
        return Err(SimError::InvalidOrbitalElements(format!(
            "eccentricity must be non-negative, got {e}"
        )));
    }
    if e >= 1.0 {
        return Err(SimError::InvalidOrbitalElements(format!(
            "eccentricity {e} is not a closed ellipse (must be < 1)"
        )));
    }

    let distance = if elements.at_perihelion {
        a * (1.0 - e)
    } else {
        a * (1.0 + e)
    };

    let radicand = g * anchor_mass * (2.0 / distance - 1.0 / a);
    if radicand < 0.0 {
        return Err(SimError::InvalidOrbitalElements(format!(
            "vis-viva radicand is negative at r = {distance} m"
        )));
    }
    let speed = radicand.sqrt();

    let theta = elements.start_angle_deg.to_radians();
    let position = angle_to_vec(theta) * distance;
    // Perpendicular to the radius vector, counter-clockwise.
    let velocity = Vec2::new(-theta.sin(), theta.cos()) * speed;
    Ok((position, velocity))
}
