use orbitsim::{OrbitalElements, Settings, SimError, SimulationSpace, TrailParams, Vec2};

const G: f64 = 6.674e-11;
const SOLAR_MASS: f64 = 1.98892e30;
const AU: f64 = 1.496e11;

/// Settings matching a one-day-per-tick solar-system run.
fn solar_settings() -> Settings {
    Settings {
        gravitational_constant: G,
        timestep_s: 86_400.0,
        tick_interval_ms: 16,
        unit_distance_m: AU,
        base_pixels_per_unit: 100.0,
        zoom: 1.0,
        paused: false,
        trail_recording: true,
        trail: TrailParams::default(),
    }
}

/// Anchor at the origin plus one body on a circular 1 AU orbit.
fn sun_and_earth() -> SimulationSpace {
    let mut sim = SimulationSpace::new(solar_settings(), Vec2::new(475.0, 337.5));
    sim.spawn_anchor("sun", SOLAR_MASS, 25.0).unwrap();
    let speed = (G * SOLAR_MASS / AU).sqrt();
    sim.spawn("earth", 5.9742e24, Vec2::new(AU, 0.0), Vec2::new(0.0, speed), 8.0)
        .unwrap();
    sim
}

// ==================================================================================
// Orbit stability
// ==================================================================================

#[test]
fn circular_orbit_stays_within_five_percent_over_a_year() {
    let mut sim = sun_and_earth();
    sim.run(365).unwrap();
    let earth = sim.body("earth").unwrap();
    let anchor = sim.anchor().unwrap();
    let distance = earth.real_position.distance(anchor.real_position);
    assert!(
        (distance - AU).abs() < 0.05 * AU,
        "orbit drifted to {:.4} AU after one year",
        distance / AU
    );
}

#[test]
fn elements_spawned_orbit_matches_direct_state() {
    let mut by_elements = SimulationSpace::new(solar_settings(), Vec2::zero());
    by_elements.spawn_anchor("sun", SOLAR_MASS, 25.0).unwrap();
    by_elements
        .spawn_from_elements(
            "earth",
            5.9742e24,
            8.0,
            &OrbitalElements {
                semi_major_axis_m: AU,
                eccentricity: 0.0,
                start_angle_deg: 0.0,
                at_perihelion: true,
            },
        )
        .unwrap();

    let direct = sun_and_earth();
    let a = by_elements.body("earth").unwrap();
    let b = direct.body("earth").unwrap();
    assert_eq!(a.real_position, b.real_position);
    assert!((a.velocity.length() - b.velocity.length()).abs() < 1e-9 * b.velocity.length());
}

// ==================================================================================
// Failure semantics
// ==================================================================================

#[test]
fn coincident_bodies_fail_the_step_and_leave_state_untouched() {
    let mut sim = SimulationSpace::new(solar_settings(), Vec2::zero());
    sim.spawn_anchor("sun", SOLAR_MASS, 25.0).unwrap();
    sim.spawn("a", 1.0e24, Vec2::new(AU, 0.0), Vec2::new(0.0, 1.0e4), 5.0)
        .unwrap();
    sim.spawn("b", 1.0e24, Vec2::new(AU, 0.0), Vec2::new(0.0, -1.0e4), 5.0)
        .unwrap();

    let before: Vec<(Vec2, Vec2)> = sim
        .bodies()
        .iter()
        .map(|b| (b.real_position, b.velocity))
        .collect();

    let result = sim.step();
    assert!(matches!(result, Err(SimError::DegenerateSeparation(..))));

    // No partial integration was committed.
    for (body, (pos, vel)) in sim.bodies().iter().zip(before) {
        assert_eq!(body.real_position, pos);
        assert_eq!(body.velocity, vel);
    }
    assert_eq!(sim.step_count(), 0);
}

#[test]
fn spawn_failures_leave_the_body_set_unchanged() {
    let mut sim = sun_and_earth();
    let count = sim.body_count();
    assert!(sim.spawn("moon", 0.0, Vec2::zero(), Vec2::zero(), 2.0).is_err());
    assert!(sim
        .spawn("earth", 1.0e22, Vec2::new(2.0 * AU, 0.0), Vec2::zero(), 2.0)
        .is_err());
    assert_eq!(sim.body_count(), count);
}

#[test]
fn anchor_survives_removal_attempts() {
    let mut sim = sun_and_earth();
    assert!(matches!(sim.remove("sun"), Err(SimError::AnchorRemoval(_))));
    assert_eq!(sim.body_count(), 2);
    assert!(sim.anchor().is_some());
}

// ==================================================================================
// Display mapping determinism
// ==================================================================================

#[test]
fn zoom_round_trip_restores_display_state_bit_for_bit() {
    let mut sim = sun_and_earth();
    sim.run(10).unwrap();

    let before: Vec<(u64, u64, u64)> = sim
        .bodies()
        .iter()
        .map(|b| {
            (
                b.display_position.x.to_bits(),
                b.display_position.y.to_bits(),
                b.display_radius.to_bits(),
            )
        })
        .collect();

    sim.set_zoom(2.0).unwrap();
    sim.set_zoom(1.0).unwrap();

    for (body, (x, y, r)) in sim.bodies().iter().zip(before) {
        assert_eq!(body.display_position.x.to_bits(), x);
        assert_eq!(body.display_position.y.to_bits(), y);
        assert_eq!(body.display_radius.to_bits(), r);
    }
}

#[test]
fn zoom_change_resets_trails() {
    let mut sim = sun_and_earth();
    sim.run(20).unwrap();
    assert_eq!(sim.body("earth").unwrap().trail.len(), 20);
    sim.set_zoom(0.5).unwrap();
    assert!(sim.body("earth").unwrap().trail.is_empty());
    assert!(matches!(sim.set_zoom(0.0), Err(SimError::InvalidZoom(_))));
}

#[test]
fn disabling_trail_recording_clears_and_stops_growth() {
    let mut sim = sun_and_earth();
    sim.run(5).unwrap();
    assert_eq!(sim.body("earth").unwrap().trail.len(), 5);
    sim.set_trail_recording(false);
    assert!(sim.body("earth").unwrap().trail.is_empty());
    sim.run(5).unwrap();
    assert!(sim.body("earth").unwrap().trail.is_empty());
    sim.set_trail_recording(true);
    sim.run(5).unwrap();
    assert_eq!(sim.body("earth").unwrap().trail.len(), 5);
}

// ==================================================================================
// Snapshots
// ==================================================================================

#[test]
fn snapshots_capture_time_and_anchor_distance() {
    let mut sim = sun_and_earth();
    sim.record_snapshot();
    sim.run(10).unwrap();
    sim.record_snapshot();

    let snapshots = sim.recorded_snapshots();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].time_s, 0.0);
    assert_eq!(snapshots[1].time_s, 10.0 * 86_400.0);
    assert_eq!(snapshots[1].body_count, 2);

    let earth = snapshots[1]
        .bodies
        .iter()
        .find(|b| b.tag == "earth")
        .unwrap();
    assert!(!earth.is_anchor);
    assert!((earth.distance_to_anchor_m - AU).abs() < 0.01 * AU);
    assert_eq!(earth.trail_len, 10);
}
