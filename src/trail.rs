//! Per-body orbital trail: a bounded history of display-space points.
//!
//! The buffer grows freely through a warmup phase, then starts comparing
//! the newest point against the oldest. Once the trail returns to within a
//! pixel tolerance of its start the orbit is treated as having completed
//! one revolution, and from then on the buffer is a sliding window of
//! exactly one observed period, so the drawn trail shows a single loop
//! instead of growing without bound. Non-closing trajectories are capped
//! at an absolute maximum.

use crate::settings::TrailParams;
use crate::vecmath::Vec2;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct OrbitTrailBuffer {
    points: VecDeque<Vec2>,
    /// Number of points in one observed revolution, frozen at the moment
    /// closure is first detected.
    orbital_length: Option<usize>,
    params: TrailParams,
}

impl OrbitTrailBuffer {
    pub fn new(params: TrailParams) -> Self {
        Self {
            points: VecDeque::new(),
            orbital_length: None,
            params,
        }
    }

    /// Appends a display-space point and applies the closure/compaction policy.
    pub fn append(&mut self, point: Vec2) {
        self.points.push_back(point);

        if self.orbital_length.is_none() && self.points.len() > self.params.warmup_points {
            if let (Some(first), Some(last)) = (self.points.front(), self.points.back()) {
                let tol = self.params.closure_tolerance_px;
                if (last.x - first.x).abs() < tol && (last.y - first.y).abs() < tol {
                    self.orbital_length = Some(self.points.len());
                }
            }
        }

        let cap = self.orbital_length.unwrap_or(self.params.max_points);
        while self.points.len() > cap {
            self.points.pop_front();
        }
    }

    /// Clears all points and the frozen period. Invoked whenever the trail
    /// becomes stale in display space (zoom change) or recording is toggled.
    pub fn reset(&mut self) {
        self.points.clear();
        self.orbital_length = None;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Detected period length, if the orbit has closed once.
    pub fn orbital_length(&self) -> Option<usize> {
        self.orbital_length
    }

    /// Ordered points, oldest first, for an external renderer to draw.
    pub fn points(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }
}
