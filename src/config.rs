use crate::elements::OrbitalElements;
use crate::settings::{Settings, TrailParams};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Physical constants and stepping cadence
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PhysicsConfig {
    pub gravitational_constant: f64,
    pub timestep_s: f64,
    pub tick_interval_ms: u32,
}

// Real-space to display-space mapping
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DisplayConfig {
    /// Meters per simulation distance unit (e.g. 1 AU).
    pub unit_distance_m: f64,
    /// Pixels per distance unit at zoom 1.0.
    pub base_pixels_per_unit: f64,
    pub zoom: f64,
    /// Display-space position of the real-space origin.
    pub origin_px: [f64; 2],
}

// Orbital-trail recording and closure heuristic
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TrailConfig {
    #[serde(default = "default_trail_enabled")]
    pub enabled: bool,
    #[serde(default = "default_warmup_points")]
    pub warmup_points: usize,
    #[serde(default = "default_closure_tolerance_px")]
    pub closure_tolerance_px: f64,
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

fn default_trail_enabled() -> bool {
    true
}
fn default_warmup_points() -> usize {
    50
}
fn default_closure_tolerance_px() -> f64 {
    3.0
}
fn default_max_points() -> usize {
    5_000
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            enabled: default_trail_enabled(),
            warmup_points: default_warmup_points(),
            closure_tolerance_px: default_closure_tolerance_px(),
            max_points: default_max_points(),
        }
    }
}

// Headless-run timing
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TimingConfig {
    pub total_time_s: f64,
    pub record_interval_s: f64,
}

// The distinguished central body
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AnchorConfig {
    pub tag: String,
    pub mass_kg: f64,
    pub base_radius_px: f64,
}

/// Initial state for a single orbiting body: either an explicit
/// position/velocity pair or classical orbital elements, never both.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BodyConfig {
    pub tag: String,
    pub mass_kg: f64,
    pub base_radius_px: f64,
    #[serde(default)]
    pub position_m: Option<[f64; 2]>,
    #[serde(default)]
    pub velocity_m_s: Option<[f64; 2]>,
    #[serde(default)]
    pub elements: Option<OrbitalElements>,
}

/// A seeded, randomized debris belt spawned around the anchor.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BeltConfig {
    pub count: u32,
    pub seed: u64,
    pub semi_major_axis_min_m: f64,
    pub semi_major_axis_max_m: f64,
    #[serde(default)]
    pub max_eccentricity: f64,
    /// Median of the log-normal mass distribution.
    pub median_mass_kg: f64,
    /// Log-space sigma of the mass distribution.
    #[serde(default = "default_mass_sigma")]
    pub mass_sigma: f64,
    pub base_radius_px: f64,
}

fn default_mass_sigma() -> f64 {
    0.5
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub anchor: AnchorConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub belt: Option<BeltConfig>,
}

// Output settings for the headless driver
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub base_filename: String,
    /// Snapshot format: "json", "bincode", "messagepack".
    pub format: Option<String>,
    pub save_snapshots: bool,
    pub save_positions: bool,
}

/// Main simulation configuration, loaded from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub display: DisplayConfig,
    #[serde(default)]
    pub trail: TrailConfig,
    pub timing: TimingConfig,
    pub scenario: ScenarioConfig,
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Loads and validates the simulation configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e)
        })?;
        let config: SimulationConfig = toml::from_str(&config_str).map_err(|e| {
            anyhow::anyhow!("Failed to parse TOML from '{}': {}", path_ref.display(), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.physics.timestep_s <= 0.0 {
            anyhow::bail!("physics.timestep_s must be positive.");
        }
        if self.physics.tick_interval_ms == 0 {
            anyhow::bail!("physics.tick_interval_ms must be positive.");
        }
        if self.display.zoom <= 0.0 {
            anyhow::bail!("display.zoom must be positive.");
        }
        if self.display.unit_distance_m <= 0.0 || self.display.base_pixels_per_unit <= 0.0 {
            anyhow::bail!("display scale constants must be positive.");
        }
        if self.scenario.anchor.mass_kg <= 0.0 {
            anyhow::bail!("scenario.anchor.mass_kg must be positive.");
        }
        if self.scenario.anchor.base_radius_px <= 0.0 {
            anyhow::bail!("scenario.anchor.base_radius_px must be positive.");
        }
        for body in &self.scenario.bodies {
            if body.base_radius_px <= 0.0 {
                anyhow::bail!("body '{}': base_radius_px must be positive.", body.tag);
            }
            let explicit = body.position_m.is_some() || body.velocity_m_s.is_some();
            match (&body.elements, explicit) {
                (Some(_), true) => anyhow::bail!(
                    "body '{}': give either orbital elements or an explicit state, not both.",
                    body.tag
                ),
                (None, false) => anyhow::bail!(
                    "body '{}': needs orbital elements or position_m + velocity_m_s.",
                    body.tag
                ),
                (None, true) if body.position_m.is_none() || body.velocity_m_s.is_none() => {
                    anyhow::bail!(
                        "body '{}': explicit state needs both position_m and velocity_m_s.",
                        body.tag
                    )
                }
                _ => {}
            }
        }
        if let Some(belt) = &self.scenario.belt {
            if belt.semi_major_axis_min_m <= 0.0
                || belt.semi_major_axis_max_m < belt.semi_major_axis_min_m
            {
                anyhow::bail!("scenario.belt semi-major-axis range is invalid.");
            }
            if !(0.0..1.0).contains(&belt.max_eccentricity) {
                anyhow::bail!("scenario.belt.max_eccentricity must lie in [0, 1).");
            }
            if belt.median_mass_kg <= 0.0 {
                anyhow::bail!("scenario.belt.median_mass_kg must be positive.");
            }
        }
        if self.timing.total_time_s <= 0.0 {
            anyhow::bail!("timing.total_time_s must be positive.");
        }
        Ok(())
    }

    /// Converts the configuration into the runtime settings bundle.
    pub fn get_settings(&self) -> Settings {
        Settings {
            gravitational_constant: self.physics.gravitational_constant,
            timestep_s: self.physics.timestep_s,
            tick_interval_ms: self.physics.tick_interval_ms,
            unit_distance_m: self.display.unit_distance_m,
            base_pixels_per_unit: self.display.base_pixels_per_unit,
            zoom: self.display.zoom,
            paused: false,
            trail_recording: self.trail.enabled,
            trail: TrailParams {
                warmup_points: self.trail.warmup_points,
                closure_tolerance_px: self.trail.closure_tolerance_px,
                max_points: self.trail.max_points,
            },
        }
    }
}
