//! Arc sector geometry for ripple rings
//!
//! Angles are in screen space (y grows downward), so the ripple's upward
//! half-disc spans theta in [-π, 0]. An arc segment is defined by:
//! - radius: centerline distance from the arc's origin
//! - thickness: radial extent (inner = radius - thickness/2, outer = radius + thickness/2)
//! - theta_start, theta_end: angular extent

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// A thickened arc segment around a local origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcSegment {
    /// Centerline radius
    pub radius: f32,
    /// Radial thickness (extends radius ± thickness/2)
    pub thickness: f32,
    /// Start angle (radians, normalized to [-π, π))
    pub theta_start: f32,
    /// End angle (radians, normalized to [-π, π))
    pub theta_end: f32,
}

impl ArcSegment {
    pub fn new(radius: f32, thickness: f32, theta_start: f32, theta_end: f32) -> Self {
        Self {
            radius,
            thickness,
            theta_start: normalize_angle(theta_start),
            theta_end: normalize_angle(theta_end),
        }
    }

    /// Filled upward half-disc of the given outer radius
    pub fn upper_half_disc(outer_radius: f32) -> Self {
        Self::new(outer_radius / 2.0, outer_radius, -PI, 0.0)
    }

    /// Zero-thickness upward half ring (what a ripple ring is drawn as)
    pub fn upper_half_ring(radius: f32) -> Self {
        Self::new(radius, 0.0, -PI, 0.0)
    }

    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.radius - self.thickness / 2.0
    }

    #[inline]
    pub fn outer_radius(&self) -> f32 {
        self.radius + self.thickness / 2.0
    }

    /// Angular span of the arc (handles wraparound)
    pub fn angular_span(&self) -> f32 {
        let mut span = self.theta_end - self.theta_start;
        if span < 0.0 {
            span += std::f32::consts::TAU;
        }
        span
    }

    /// Check if an angle is within the arc's angular extent
    pub fn contains_angle(&self, theta: f32) -> bool {
        let theta = normalize_angle(theta);
        let start = self.theta_start;
        let end = self.theta_end;

        if start <= end {
            theta >= start && theta <= end
        } else {
            // Wraparound case (e.g., start=170°, end=-170°)
            theta >= start || theta <= end
        }
    }

    /// Check if a point relative to the arc origin lies inside the band.
    /// The outer edge is exclusive so touching tests stay strict.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let r = point.length();
        let theta = point.y.atan2(point.x);

        r >= self.inner_radius() && r < self.outer_radius() && self.contains_angle(theta)
    }
}
