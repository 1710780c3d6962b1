//! Owns the body set and runs the per-tick physics step.
//!
//! The space is single-threaded and cooperative: an external scheduler
//! calls [`SimulationSpace::step`] once per tick, and spawn/remove/setter
//! calls happen between ticks on the same thread. `step()` computes every
//! pairwise force before committing anything, so a failed pair (coincident
//! bodies) leaves the previous tick's state fully intact.

use crate::body::Body;
use crate::elements::{state_from_elements, OrbitalElements};
use crate::error::{SimError, SimResult};
use crate::settings::Settings;
use crate::snapshot::{BodyState, Snapshot};
use crate::vecmath::Vec2;
use log::{debug, trace};

/// Callback handed the selected body's state once per step.
///
/// Selection is exposed outward through this observer instead of the body
/// set calling back into its owner.
pub type SelectionObserver = Box<dyn FnMut(&Body)>;

pub struct SimulationSpace {
    settings: Settings,
    /// Display-space offset of the real-space origin (typically the canvas
    /// center).
    origin_offset: Vec2,
    /// Insertion order is iteration order; repeated runs with identical
    /// inputs are bit-reproducible.
    bodies: Vec<Body>,
    selected: Option<String>,
    selection_observer: Option<SelectionObserver>,
    recorded_snapshots: Vec<Snapshot>,
    step_count: u64,
}

impl SimulationSpace {
    pub fn new(settings: Settings, origin_offset: Vec2) -> Self {
        Self {
            settings,
            origin_offset,
            bodies: Vec::new(),
            selected: None,
            selection_observer: None,
            recorded_snapshots: Vec::new(),
            step_count: 0,
        }
    }

    // ---- Spawn / remove -------------------------------------------------

    /// Registers a new body. Nothing is mutated unless every validation
    /// passes.
    pub fn spawn(
        &mut self,
        tag: impl Into<String>,
        mass: f64,
        position: Vec2,
        velocity: Vec2,
        base_radius: f64,
    ) -> SimResult<()> {
        let tag = tag.into();
        if self.bodies.iter().any(|b| b.tag() == tag) {
            return Err(SimError::DuplicateTag(tag));
        }
        let mut body = Body::new(tag, mass, position, velocity, base_radius, &self.settings)?;
        body.refresh_display(&self.settings, self.origin_offset, false);
        debug!("spawned body '{}' (mass {:.3e} kg)", body.tag(), body.mass);
        self.bodies.push(body);
        Ok(())
    }

    /// Spawns the anchor body at the origin with zero velocity. At most one
    /// anchor may exist at a time.
    pub fn spawn_anchor(
        &mut self,
        tag: impl Into<String>,
        mass: f64,
        base_radius: f64,
    ) -> SimResult<()> {
        if let Some(anchor) = self.anchor() {
            return Err(SimError::AnchorAlreadyExists(anchor.tag().to_string()));
        }
        self.spawn(tag, mass, Vec2::zero(), Vec2::zero(), base_radius)?;
        if let Some(body) = self.bodies.last_mut() {
            body.is_anchor = true;
        }
        Ok(())
    }

    /// Derives an initial state from orbital elements around the current
    /// anchor, then spawns with it.
    pub fn spawn_from_elements(
        &mut self,
        tag: impl Into<String>,
        mass: f64,
        base_radius: f64,
        elements: &OrbitalElements,
    ) -> SimResult<()> {
        let anchor_mass = self
            .anchor()
            .map(|a| a.mass)
            .ok_or_else(|| SimError::InvalidOrbitalElements("no anchor body to orbit".into()))?;
        let (position, velocity) =
            state_from_elements(self.settings.gravitational_constant, anchor_mass, elements)?;
        self.spawn(tag, mass, position, velocity, base_radius)
    }

    /// Detaches a body and its trail. The anchor is exempt from removal.
    pub fn remove(&mut self, tag: &str) -> SimResult<()> {
        let idx = self
            .bodies
            .iter()
            .position(|b| b.tag() == tag)
            .ok_or_else(|| SimError::UnknownTag(tag.to_string()))?;
        if self.bodies[idx].is_anchor {
            return Err(SimError::AnchorRemoval(tag.to_string()));
        }
        self.bodies.remove(idx);
        if self.selected.as_deref() == Some(tag) {
            self.selected = None;
        }
        debug!("removed body '{tag}'");
        Ok(())
    }

    // ---- Selection ------------------------------------------------------

    pub fn select(&mut self, tag: &str) -> SimResult<()> {
        if !self.bodies.iter().any(|b| b.tag() == tag) {
            return Err(SimError::UnknownTag(tag.to_string()));
        }
        self.selected = Some(tag.to_string());
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_body(&self) -> Option<&Body> {
        let tag = self.selected.as_deref()?;
        self.bodies.iter().find(|b| b.tag() == tag)
    }

    /// Registers the observer invoked once per `step()` while a selection
    /// is non-empty.
    pub fn set_selection_observer(&mut self, observer: SelectionObserver) {
        self.selection_observer = Some(observer);
    }

    // ---- Accessors ------------------------------------------------------

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, tag: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.tag() == tag)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn anchor(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.is_anchor)
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Simulation time in seconds (integrated steps times the timestep).
    pub fn time_s(&self) -> f64 {
        self.step_count as f64 * self.settings.timestep_s
    }

    // ---- Stepping -------------------------------------------------------

    /// Advances the simulation by one tick.
    ///
    /// While paused only the display state is refreshed, so zoom and
    /// selection stay responsive without integrating. While running the
    /// step accumulates every ordered-pair force first; any degenerate pair
    /// aborts the call before positions or velocities are touched.
    pub fn step(&mut self) -> SimResult<()> {
        if !self.settings.paused {
            let g = self.settings.gravitational_constant;
            let dt = self.settings.timestep_s;
            let n = self.bodies.len();

            // Accumulate all pairwise forces before mutating anything.
            // Both ordered directions are computed rather than mirroring
            // one half; that is the chosen reproducibility semantics.
            let mut net_forces = vec![Vec2::zero(); n];
            let mut anchor_distances = vec![None; n];
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let (a, b) = (&self.bodies[i], &self.bodies[j]);
                    net_forces[i] = net_forces[i] + a.force_from(b, g)?;
                    if b.is_anchor {
                        anchor_distances[i] = Some(a.real_position.distance(b.real_position));
                    }
                }
            }

            for (i, body) in self.bodies.iter_mut().enumerate() {
                if let Some(d) = anchor_distances[i] {
                    body.distance_to_anchor = d;
                }
                body.integrate(net_forces[i], dt);
            }
            self.step_count += 1;
            trace!("step {} integrated {} bodies", self.step_count, n);
        }

        let record_trail = self.settings.trail_recording && !self.settings.paused;
        for body in &mut self.bodies {
            body.refresh_display(&self.settings, self.origin_offset, record_trail);
        }

        if let Some(observer) = self.selection_observer.as_mut() {
            if let Some(tag) = self.selected.as_deref() {
                if let Some(body) = self.bodies.iter().find(|b| b.tag() == tag) {
                    observer(body);
                }
            }
        }
        Ok(())
    }

    /// Runs a fixed number of ticks; the explicit budget lets a harness
    /// drive the simulation deterministically without a host timer.
    pub fn run(&mut self, steps: u64) -> SimResult<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    // ---- Settings control surface ---------------------------------------

    /// Updates the zoom factor, resets every trail (display-space points go
    /// stale under rescaling) and recomputes display state immediately.
    pub fn set_zoom(&mut self, zoom: f64) -> SimResult<()> {
        if zoom <= 0.0 {
            return Err(SimError::InvalidZoom(zoom));
        }
        self.settings.zoom = zoom;
        self.refresh_all_displays_without_trails();
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.settings.paused = paused;
    }

    pub fn set_tick_interval(&mut self, ms: u32) -> SimResult<()> {
        if ms == 0 {
            return Err(SimError::InvalidTickInterval);
        }
        self.settings.tick_interval_ms = ms;
        Ok(())
    }

    /// Toggles trail recording. Disabling clears every trail; re-enabling
    /// starts from empty buffers.
    pub fn set_trail_recording(&mut self, enabled: bool) {
        if !enabled {
            for body in &mut self.bodies {
                body.trail.reset();
            }
        }
        self.settings.trail_recording = enabled;
    }

    /// Moves the display-space origin. Trails are display-space and become
    /// stale under the shift, so they reset as under a zoom change.
    pub fn set_origin_offset(&mut self, origin_offset: Vec2) {
        self.origin_offset = origin_offset;
        self.refresh_all_displays_without_trails();
    }

    /// Recenters the anchor at the origin with zero velocity.
    ///
    /// Anchor drift under mutual gravity is the default physical behavior;
    /// this is the optional, explicitly invoked reset and nothing calls it
    /// implicitly.
    pub fn reset_anchor(&mut self) -> SimResult<()> {
        let settings = self.settings.clone();
        let origin = self.origin_offset;
        let anchor = self
            .bodies
            .iter_mut()
            .find(|b| b.is_anchor)
            .ok_or_else(|| SimError::UnknownTag("anchor".to_string()))?;
        anchor.real_position = Vec2::zero();
        anchor.velocity = Vec2::zero();
        anchor.refresh_display(&settings, origin, false);
        Ok(())
    }

    fn refresh_all_displays_without_trails(&mut self) {
        let settings = self.settings.clone();
        for body in &mut self.bodies {
            body.trail.reset();
            body.refresh_display(&settings, self.origin_offset, false);
        }
    }

    // ---- Snapshot recording ---------------------------------------------

    /// Records the current state for later export.
    pub fn record_snapshot(&mut self) {
        let snapshot = Snapshot {
            time_s: self.time_s(),
            step: self.step_count,
            body_count: self.bodies.len(),
            bodies: self
                .bodies
                .iter()
                .map(|b| BodyState {
                    tag: b.tag().to_string(),
                    mass: b.mass,
                    position_m: (b.real_position.x, b.real_position.y),
                    velocity_m_s: (b.velocity.x, b.velocity.y),
                    display_position_px: (b.display_position.x, b.display_position.y),
                    display_radius_px: b.display_radius,
                    is_anchor: b.is_anchor,
                    distance_to_anchor_m: b.distance_to_anchor,
                    trail_len: b.trail.len(),
                })
                .collect(),
        };
        trace!("recorded snapshot at t = {:.1} s", snapshot.time_s);
        self.recorded_snapshots.push(snapshot);
    }

    pub fn recorded_snapshots(&self) -> &[Snapshot] {
        &self.recorded_snapshots
    }
}
