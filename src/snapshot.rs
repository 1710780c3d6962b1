use serde::{Deserialize, Serialize};

/// A snapshot of the simulation state at a specific time.
///
/// This is the render-sink data in recordable form: everything an external
/// renderer or analysis script needs, with no drawing performed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Simulation time (seconds) at which the snapshot was taken.
    pub time_s: f64,
    /// Physics step count at the snapshot.
    pub step: u64,
    pub body_count: usize,
    pub bodies: Vec<BodyState>,
}

/// Per-body state carried by a [`Snapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyState {
    pub tag: String,
    pub mass: f64,
    pub position_m: (f64, f64),
    pub velocity_m_s: (f64, f64),
    pub display_position_px: (f64, f64),
    pub display_radius_px: f64,
    pub is_anchor: bool,
    pub distance_to_anchor_m: f64,
    /// Current trail length; the points themselves are display-transient
    /// and not worth persisting.
    pub trail_len: usize,
}
