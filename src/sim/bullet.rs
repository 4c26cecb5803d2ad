//! Bullet entity: movement, wall bounce, ripple decay and ripple contact

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arc::ArcSegment;
use crate::consts::{FIRE_DIRECTION, RIPPLE_RINGS};
use crate::tuning::{RipplePolicy, Tuning};
use crate::{normalize_or, rotate};

/// Direction every bullet is created with
#[inline]
pub fn fire_direction() -> Vec2 {
    Vec2::new(FIRE_DIRECTION.0, FIRE_DIRECTION.1)
}

/// A single projectile. Whether it is fired or bouncing depends on which
/// collection of `GameState` holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Unit direction of travel
    pub dir: Vec2,
    pub ripple_active: bool,
    /// Ticks left before the ripple switches off
    pub ripple_ticks: u32,
}

impl Bullet {
    /// Freshly fired bullet: heading up with its ripple armed
    pub fn fired(id: u32, pos: Vec2, ripple_duration: u32) -> Self {
        Self {
            id,
            pos,
            dir: fire_direction(),
            ripple_active: true,
            ripple_ticks: ripple_duration,
        }
    }

    /// Threat bullet at `pos` with no ripple
    pub fn bouncing(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            dir: fire_direction(),
            ripple_active: false,
            ripple_ticks: 0,
        }
    }

    /// Combine two bullets into a new one at their midpoint, keeping `b1`'s heading
    pub fn merge(id: u32, b1: &Bullet, b2: &Bullet, ripple_duration: u32) -> Bullet {
        Bullet {
            id,
            pos: (b1.pos + b2.pos) / 2.0,
            dir: b1.dir,
            ripple_active: true,
            ripple_ticks: ripple_duration,
        }
    }

    /// Move one tick, decay the ripple and reflect off the walls.
    /// Returns true if either axis bounced.
    pub fn advance(&mut self, tuning: &Tuning, rng: &mut impl Rng) -> bool {
        self.pos += self.dir * tuning.bullet_speed;

        if self.ripple_ticks > 0 {
            self.ripple_ticks -= 1;
        } else {
            self.ripple_active = false;
        }

        let left = tuning.left_wall as f32;
        let right = tuning.right_wall() as f32;
        let top = tuning.top_wall as f32;
        let bottom = tuning.bottom_wall() as f32;

        let mut bounced = false;
        if self.pos.x <= left || self.pos.x >= right {
            self.dir.x = -self.dir.x;
            bounced = true;
        }
        if self.pos.y <= top || self.pos.y >= bottom {
            self.dir.y = -self.dir.y;
            bounced = true;
        }

        if bounced {
            self.apply_random_bounce(tuning.bounce_jitter_deg, rng);
        }
        bounced
    }

    /// Rotate the heading by a uniform angle in [-max_deg, max_deg] and re-normalize
    pub fn apply_random_bounce(&mut self, max_deg: f32, rng: &mut impl Rng) {
        let angle = if max_deg > 0.0 {
            rng.random_range(-max_deg..=max_deg).to_radians()
        } else {
            0.0
        };
        self.dir = normalize_or(rotate(self.dir, angle), fire_direction());
    }

    /// Outer ripple radius after the elapsed ripple time (integer pixels)
    pub fn ripple_radius(&self, ripple_duration: u32) -> i32 {
        let elapsed = ripple_duration.saturating_sub(self.ripple_ticks) as i32;
        elapsed * 2 * 3 / 2
    }

    /// Whether `other` sits inside this bullet's ripple
    pub fn is_touching_ripple(&self, other: &Bullet, tuning: &Tuning) -> bool {
        let radius = self.ripple_radius(tuning.ripple_duration) as f32;
        match tuning.ripple_policy {
            RipplePolicy::Radius => self.pos.distance(other.pos) < radius,
            RipplePolicy::ArcSector => {
                radius > 0.0 && ArcSegment::upper_half_disc(radius).contains_point(other.pos - self.pos)
            }
        }
    }

    /// Radius of each drawn ripple ring, innermost first; None once the ripple is gone
    pub fn ring_radii(&self, ripple_duration: u32) -> Option<[f32; RIPPLE_RINGS]> {
        if !self.ripple_active {
            return None;
        }
        let step = ripple_duration.saturating_sub(self.ripple_ticks) as f32;
        let mut radii = [0.0; RIPPLE_RINGS];
        for (i, r) in radii.iter_mut().enumerate() {
            *r = step * (i + 1) as f32;
        }
        Some(radii)
    }
}
