use serde::{Deserialize, Serialize};

/// Named constants for the orbital-trail closure heuristic.
///
/// These are resolution/zoom-dependent heuristics, so they live in the
/// settings bundle rather than as embedded literals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailParams {
    /// Closure detection only runs once a trail holds more than this many points.
    pub warmup_points: usize,
    /// Display-space tolerance (pixels, per axis) for treating the newest
    /// trail point as a return to the first one.
    pub closure_tolerance_px: f64,
    /// Absolute cap on trail length before a period is detected, so a
    /// non-closing trajectory cannot grow a trail without bound.
    pub max_points: usize,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            warmup_points: 50,
            closure_tolerance_px: 3.0,
            max_points: 5_000,
        }
    }
}

/// Runtime settings derived from the configuration, read by every
/// operation that needs physical constants or the display mapping.
///
/// Immutable during a step; mutated only through the explicit
/// `SimulationSpace` setters between ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // Physics
    pub gravitational_constant: f64,
    /// Integration timestep in seconds.
    pub timestep_s: f64,
    /// Interval at which the host scheduler is expected to invoke `step()`.
    pub tick_interval_ms: u32,

    // Display mapping
    /// Meters represented by one simulation distance unit (e.g. 1 AU).
    pub unit_distance_m: f64,
    /// Pixels per distance unit at zoom 1.0.
    pub base_pixels_per_unit: f64,
    pub zoom: f64,

    // Stepping state
    pub paused: bool,
    pub trail_recording: bool,
    pub trail: TrailParams,
}

impl Settings {
    /// Pixels per meter at the current zoom.
    #[inline(always)]
    pub fn scale(&self) -> f64 {
        self.base_pixels_per_unit * self.zoom / self.unit_distance_m
    }
}
