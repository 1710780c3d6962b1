//! Builds a fully-initialized [`SimulationSpace`] from a [`SimulationConfig`]:
//! the anchor, every configured body (explicit state or orbital elements),
//! and an optional seeded debris belt.

use crate::config::{BeltConfig, SimulationConfig};
use crate::elements::OrbitalElements;
use crate::simulation::SimulationSpace;
use crate::vecmath::Vec2;
use anyhow::Result;
use log::info;
use rand::distr::Uniform;
use rand::prelude::*;
use rand_distr::LogNormal;

pub fn build_simulation(config: &SimulationConfig) -> Result<SimulationSpace> {
    let settings = config.get_settings();
    let origin = Vec2::new(config.display.origin_px[0], config.display.origin_px[1]);
    let mut sim = SimulationSpace::new(settings, origin);

    let anchor = &config.scenario.anchor;
    sim.spawn_anchor(anchor.tag.clone(), anchor.mass_kg, anchor.base_radius_px)?;

    for body in &config.scenario.bodies {
        match (&body.elements, &body.position_m, &body.velocity_m_s) {
            (Some(elements), _, _) => {
                sim.spawn_from_elements(
                    body.tag.clone(),
                    body.mass_kg,
                    body.base_radius_px,
                    elements,
                )?;
            }
            (None, Some(pos), Some(vel)) => {
                sim.spawn(
                    body.tag.clone(),
                    body.mass_kg,
                    Vec2::new(pos[0], pos[1]),
                    Vec2::new(vel[0], vel[1]),
                    body.base_radius_px,
                )?;
            }
            // Config validation guarantees one of the two shapes.
            _ => anyhow::bail!("body '{}' has no usable initial state", body.tag),
        }
    }

    if let Some(belt) = &config.scenario.belt {
        spawn_belt(&mut sim, belt)?;
    }

    info!(
        "scenario built: {} bodies around anchor '{}'",
        sim.body_count(),
        anchor.tag
    );
    Ok(sim)
}

/// Spawns a reproducible randomized belt of minor bodies around the anchor.
/// The seed comes from the config so identical configs give identical belts.
fn spawn_belt(sim: &mut SimulationSpace, belt: &BeltConfig) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(belt.seed);

    let sma_dist = Uniform::new_inclusive(belt.semi_major_axis_min_m, belt.semi_major_axis_max_m)?;
    let angle_dist = Uniform::new(0.0f64, 360.0)?;
    let ecc_dist = Uniform::new_inclusive(0.0f64, belt.max_eccentricity)?;
    let mass_dist = LogNormal::new(belt.median_mass_kg.ln(), belt.mass_sigma)?;

    for i in 0..belt.count {
        let elements = OrbitalElements {
            semi_major_axis_m: rng.sample(sma_dist),
            eccentricity: rng.sample(ecc_dist),
            start_angle_deg: rng.sample(angle_dist),
            at_perihelion: rng.random_bool(0.5),
        };
        let mass = rng.sample(mass_dist);
        sim.spawn_from_elements(
            format!("belt-{i:04}"),
            mass,
            belt.base_radius_px,
            &elements,
        )?;
    }
    info!("spawned {} belt bodies (seed {})", belt.count, belt.seed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    fn config_with_belt() -> SimulationConfig {
        toml::from_str(
            r#"
            [physics]
            gravitational_constant = 6.674e-11
            timestep_s = 86400.0
            tick_interval_ms = 16

            [display]
            unit_distance_m = 1.496e11
            base_pixels_per_unit = 100.0
            zoom = 1.0
            origin_px = [475.0, 337.5]

            [timing]
            total_time_s = 31536000.0
            record_interval_s = 864000.0

            [scenario.anchor]
            tag = "sun"
            mass_kg = 1.98892e30
            base_radius_px = 25.0

            [[scenario.bodies]]
            tag = "earth"
            mass_kg = 5.9742e24
            base_radius_px = 8.0
            elements = { semi_major_axis_m = 1.496e11, eccentricity = 0.0167, start_angle_deg = 0.0, at_perihelion = true }

            [scenario.belt]
            count = 12
            seed = 42
            semi_major_axis_min_m = 3.0e11
            semi_major_axis_max_m = 5.0e11
            max_eccentricity = 0.2
            median_mass_kg = 1.0e18
            base_radius_px = 2.0

            [output]
            base_filename = "orbitsim"
            save_snapshots = false
            save_positions = false
        "#,
        )
        .unwrap()
    }

    #[test]
    fn builds_anchor_bodies_and_belt() {
        let sim = build_simulation(&config_with_belt()).unwrap();
        assert_eq!(sim.body_count(), 14); // anchor + earth + 12 belt bodies
        assert_eq!(sim.anchor().unwrap().tag(), "sun");
        assert!(sim.body("belt-0000").is_some());
    }

    #[test]
    fn identical_seeds_give_identical_belts() {
        let a = build_simulation(&config_with_belt()).unwrap();
        let b = build_simulation(&config_with_belt()).unwrap();
        for (ba, bb) in a.bodies().iter().zip(b.bodies().iter()) {
            assert_eq!(ba.tag(), bb.tag());
            assert_eq!(ba.real_position, bb.real_position);
            assert_eq!(ba.velocity, bb.velocity);
            assert_eq!(ba.mass, bb.mass);
        }
    }
}
