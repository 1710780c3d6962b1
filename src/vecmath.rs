use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D vector with 64-bit components, used for both real-space (meters)
/// and display-space (pixels) quantities.
#[derive(Copy, Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[inline(always)]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    #[inline(always)]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline(always)]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    #[inline(always)]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    #[inline(always)]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    #[inline(always)]
    pub fn scale(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    #[inline(always)]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Elementwise product.
    #[inline(always)]
    pub fn mul_components(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Scalar division. A zero divisor is a domain error, never a silent
    /// infinity.
    pub fn checked_div(self, scalar: f64) -> SimResult<Self> {
        if scalar == 0.0 {
            return Err(SimError::DivideByZero);
        }
        Ok(Self::new(self.x / scalar, self.y / scalar))
    }

    /// Elementwise division. Any zero divisor component is a domain error.
    pub fn checked_div_components(self, other: Self) -> SimResult<Self> {
        if other.x == 0.0 || other.y == 0.0 {
            return Err(SimError::DivideByZero);
        }
        Ok(Self::new(self.x / other.x, self.y / other.y))
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

/// Converts an angle (in radians) to a unit vector.
#[inline(always)]
pub fn angle_to_vec(theta: f64) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Converts a vector to an angle (in radians).
/// Uses atan2 for quadrant correctness.
#[inline(always)]
pub fn vec_to_angle(v: Vec2) -> f64 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn operators_return_new_values() {
        let a = Vec2::new(1.0, -2.0);
        let b = Vec2::new(0.5, 4.0);
        assert_eq!(a + b, Vec2::new(1.5, 2.0));
        assert_eq!(a - b, Vec2::new(0.5, -6.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, -4.0));
        assert_eq!(a.mul_components(b), Vec2::new(0.5, -8.0));
    }

    #[test]
    fn division_by_zero_is_a_domain_error() {
        let v = Vec2::new(1.0, 1.0);
        assert!(matches!(v.checked_div(0.0), Err(SimError::DivideByZero)));
        assert!(matches!(
            v.checked_div_components(Vec2::new(2.0, 0.0)),
            Err(SimError::DivideByZero)
        ));
        assert_eq!(v.checked_div(2.0).unwrap(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn angle_round_trip() {
        let theta = 1.25f64;
        let v = angle_to_vec(theta);
        assert!((vec_to_angle(v) - theta).abs() < 1e-12);
    }
}
