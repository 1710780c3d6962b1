//! A simulated point mass: physical state in meters, derived display
//! state in pixels, and a per-body orbital trail.

use crate::display;
use crate::error::{SimError, SimResult};
use crate::settings::Settings;
use crate::trail::OrbitTrailBuffer;
use crate::vecmath::{angle_to_vec, Vec2};

#[derive(Debug, Clone)]
pub struct Body {
    /// Unique within a `SimulationSpace`; immutable after creation.
    tag: String,
    /// Always positive; enforced at construction, never mutated.
    pub mass: f64,
    /// Position in meters.
    pub real_position: Vec2,
    /// Velocity in meters per second.
    pub velocity: Vec2,
    /// Drawn radius in pixels at zoom 1.0.
    pub base_radius: f64,
    /// Derived: `real_position` mapped into display space.
    pub display_position: Vec2,
    /// Derived: `base_radius * zoom`.
    pub display_radius: f64,
    pub is_anchor: bool,
    /// Separation from the anchor in meters, refreshed during force
    /// accumulation. Zero for the anchor itself.
    pub distance_to_anchor: f64,
    pub trail: OrbitTrailBuffer,
}

impl Body {
    pub fn new(
        tag: impl Into<String>,
        mass: f64,
        real_position: Vec2,
        velocity: Vec2,
        base_radius: f64,
        settings: &Settings,
    ) -> SimResult<Self> {
        if mass <= 0.0 {
            return Err(SimError::InvalidMass(mass));
        }
        Ok(Self {
            tag: tag.into(),
            mass,
            real_position,
            velocity,
            base_radius,
            display_position: Vec2::zero(),
            display_radius: display::display_radius(base_radius, settings),
            is_anchor: false,
            distance_to_anchor: 0.0,
            trail: OrbitTrailBuffer::new(settings.trail),
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Gravitational attraction exerted on `self` by `other`.
    ///
    /// Magnitude `G*m1*m2/d^2`, direction along the angle from `self` to
    /// `other`. Coincident bodies have no defined direction, so a zero
    /// separation is surfaced as an error instead of propagating NaN.
    pub fn force_from(&self, other: &Body, g: f64) -> SimResult<Vec2> {
        let d = self.real_position.distance(other.real_position);
        if d == 0.0 {
            return Err(SimError::DegenerateSeparation(
                self.tag.clone(),
                other.tag.clone(),
                self.real_position,
            ));
        }
        let magnitude = g * self.mass * other.mass / (d * d);
        let theta = (other.real_position.y - self.real_position.y)
            .atan2(other.real_position.x - self.real_position.x);
        Ok(angle_to_vec(theta) * magnitude)
    }

    /// Advances the body by one timestep with semi-implicit Euler.
    ///
    /// The velocity is updated first and the position then uses the *new*
    /// velocity. This ordering gives much better long-term energy behavior
    /// than explicit Euler and must not be reordered.
    pub fn integrate(&mut self, net_force: Vec2, dt: f64) {
        self.velocity = self.velocity + net_force * (dt / self.mass);
        self.real_position = self.real_position + self.velocity * dt;
    }

    /// Recomputes the derived display state and, when trail recording is
    /// active for this step, appends the new display position.
    pub fn refresh_display(&mut self, settings: &Settings, origin_offset: Vec2, record_trail: bool) {
        self.display_position = display::to_display(self.real_position, settings, origin_offset);
        self.display_radius = display::display_radius(self.base_radius, settings);
        if record_trail && !self.is_anchor {
            self.trail.append(self.display_position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TrailParams;

    fn settings() -> Settings {
        Settings {
            gravitational_constant: 6.674e-11,
            timestep_s: 86_400.0,
            tick_interval_ms: 16,
            unit_distance_m: 1.496e11,
            base_pixels_per_unit: 100.0,
            zoom: 1.0,
            paused: false,
            trail_recording: true,
            trail: TrailParams::default(),
        }
    }

    fn body(tag: &str, mass: f64, pos: Vec2) -> Body {
        Body::new(tag, mass, pos, Vec2::zero(), 5.0, &settings()).unwrap()
    }

    #[test]
    fn non_positive_mass_is_rejected() {
        let s = settings();
        assert!(matches!(
            Body::new("a", 0.0, Vec2::zero(), Vec2::zero(), 5.0, &s),
            Err(SimError::InvalidMass(_))
        ));
        assert!(matches!(
            Body::new("a", -2.0, Vec2::zero(), Vec2::zero(), 5.0, &s),
            Err(SimError::InvalidMass(_))
        ));
    }

    #[test]
    fn forces_obey_newtons_third_law() {
        let g = 6.674e-11;
        let a = body("a", 5.0e24, Vec2::new(0.0, 0.0));
        let b = body("b", 7.0e22, Vec2::new(3.0e8, -4.0e8));
        let f_ab = a.force_from(&b, g).unwrap();
        let f_ba = b.force_from(&a, g).unwrap();
        let rel = 1e-9 * f_ab.length();
        assert!((f_ab.x + f_ba.x).abs() < rel);
        assert!((f_ab.y + f_ba.y).abs() < rel);
    }

    #[test]
    fn force_magnitude_follows_inverse_square() {
        let g = 1.0;
        let a = body("a", 2.0, Vec2::zero());
        let near = body("b", 3.0, Vec2::new(1.0, 0.0));
        let far = body("c", 3.0, Vec2::new(2.0, 0.0));
        let f_near = a.force_from(&near, g).unwrap().length();
        let f_far = a.force_from(&far, g).unwrap().length();
        assert!((f_near / f_far - 4.0).abs() < 1e-9);
    }

    #[test]
    fn coincident_bodies_are_a_degenerate_pair() {
        let a = body("a", 1.0, Vec2::new(2.0, 2.0));
        let b = body("b", 1.0, Vec2::new(2.0, 2.0));
        assert!(matches!(
            a.force_from(&b, 1.0),
            Err(SimError::DegenerateSeparation(..))
        ));
    }

    #[test]
    fn integrate_uses_updated_velocity_for_position() {
        let mut b = body("a", 2.0, Vec2::new(1.0, 0.0));
        b.velocity = Vec2::new(0.5, 0.0);
        b.integrate(Vec2::new(4.0, 0.0), 0.5);
        // v = 0.5 + (4/2)*0.5 = 1.5; x = 1.0 + 1.5*0.5 = 1.75 (not 1.25).
        assert_eq!(b.velocity, Vec2::new(1.5, 0.0));
        assert_eq!(b.real_position, Vec2::new(1.75, 0.0));
    }

    #[test]
    fn anchor_never_records_a_trail() {
        let s = settings();
        let mut b = body("a", 1.0, Vec2::zero());
        b.is_anchor = true;
        b.refresh_display(&s, Vec2::zero(), true);
        assert!(b.trail.is_empty());
        b.is_anchor = false;
        b.refresh_display(&s, Vec2::zero(), true);
        assert_eq!(b.trail.len(), 1);
    }
}
