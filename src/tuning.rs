//! Data-driven game balance
//!
//! Every number the simulation reads lives here. Defaults mirror `consts`;
//! a session can be started from JSON, which is validated before use.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How a fired bullet decides whether another bullet sits inside its ripple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RipplePolicy {
    /// Plain distance check against the outer ring radius
    #[default]
    Radius,
    /// Exact containment in the upward half-disc the rings are drawn as
    ArcSector,
}

/// Rejected configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("ripple_duration must be at least 1 tick")]
    ZeroRippleDuration,
    #[error("collision_range must not be negative, got {value}")]
    NegativeCollisionRange { value: f32 },
    #[error("player size {player_size} does not fit walls {wall_width}x{wall_height}")]
    PlayerLargerThanWalls { player_size: i32, wall_width: i32, wall_height: i32 },
    #[error("player spawn ({x}, {y}) lies outside the walls")]
    SpawnOutsideWalls { x: i32, y: i32 },
    #[error("invalid tuning json: {0}")]
    Parse(String),
}

/// Gameplay numbers for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub bullet_speed: f32,
    pub bullet_size: f32,
    /// Ripple lifetime in ticks
    pub ripple_duration: u32,
    pub ripple_policy: RipplePolicy,

    pub player_size: i32,
    pub player_speed: i32,
    pub spawn_x: i32,
    pub spawn_y: i32,

    pub left_wall: i32,
    pub top_wall: i32,
    pub wall_width: i32,
    pub wall_height: i32,

    pub collision_range: f32,
    /// Max wall bounce deflection in degrees
    pub bounce_jitter_deg: f32,
    /// Max per-axis jitter when a fired bullet recoils off a hit
    pub hit_jitter: f32,
    /// Scheduler cadence in milliseconds
    pub tick_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bullet_speed: BULLET_SPEED,
            bullet_size: BULLET_SIZE,
            ripple_duration: RIPPLE_DURATION,
            ripple_policy: RipplePolicy::Radius,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            spawn_x: DEFAULT_PLAYER_X,
            spawn_y: DEFAULT_PLAYER_Y,

            left_wall: LEFT_WALL,
            top_wall: TOP_WALL,
            wall_width: WALL_WIDTH,
            wall_height: WALL_HEIGHT,

            collision_range: COLLISION_RANGE,
            bounce_jitter_deg: BOUNCE_JITTER_DEG,
            hit_jitter: HIT_JITTER,
            tick_ms: TICK_MS,
        }
    }
}

impl Tuning {
    #[inline]
    pub fn right_wall(&self) -> i32 {
        self.left_wall + self.wall_width
    }

    #[inline]
    pub fn bottom_wall(&self) -> i32 {
        self.top_wall + self.wall_height
    }

    /// Largest x/y the player's top-left corner may take
    pub fn player_max(&self) -> (i32, i32) {
        (
            self.right_wall() - self.player_size,
            self.bottom_wall() - self.player_size,
        )
    }

    /// Check the numbers make a playable field
    pub fn validate(&self) -> Result<(), TuningError> {
        let positives = [
            ("bullet_speed", self.bullet_speed),
            ("bullet_size", self.bullet_size),
            ("player_size", self.player_size as f32),
            ("player_speed", self.player_speed as f32),
            ("wall_width", self.wall_width as f32),
            ("wall_height", self.wall_height as f32),
            ("tick_ms", self.tick_ms as f32),
        ];
        for (field, value) in positives {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        if self.ripple_duration == 0 {
            return Err(TuningError::ZeroRippleDuration);
        }
        if !(self.collision_range >= 0.0) {
            return Err(TuningError::NegativeCollisionRange {
                value: self.collision_range,
            });
        }
        if self.player_size > self.wall_width || self.player_size > self.wall_height {
            return Err(TuningError::PlayerLargerThanWalls {
                player_size: self.player_size,
                wall_width: self.wall_width,
                wall_height: self.wall_height,
            });
        }
        let (max_x, max_y) = self.player_max();
        if !(self.left_wall..=max_x).contains(&self.spawn_x)
            || !(self.top_wall..=max_y).contains(&self.spawn_y)
        {
            return Err(TuningError::SpawnOutsideWalls {
                x: self.spawn_x,
                y: self.spawn_y,
            });
        }
        Ok(())
    }

    /// Parse and validate a tuning document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }
}
