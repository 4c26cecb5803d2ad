//! Ripple Defense - a ripple-shot arcade defense game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bullets, merges, collisions, session state)
//! - `renderer`: Render snapshots and 2D triangle geometry
//! - `platform`: Fixed-step scheduling, input tracking, demo autopilot
//! - `audio`: Fire-and-forget sound effect dispatch
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{RipplePolicy, Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation cadence in milliseconds (one tick per step)
    pub const TICK_MS: u64 = 15;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Window dimensions the play field is laid out in
    pub const FRAME_WIDTH: i32 = 620;
    pub const FRAME_HEIGHT: i32 = 640;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 5.0;
    pub const BULLET_SIZE: f32 = 5.0;
    /// Ticks a freshly fired bullet keeps its ripple
    pub const RIPPLE_DURATION: u32 = 30;
    /// Number of concentric rings drawn for an active ripple
    pub const RIPPLE_RINGS: usize = 3;

    /// Player defaults
    pub const PLAYER_SIZE: i32 = 20;
    pub const PLAYER_SPEED: i32 = 5;
    pub const DEFAULT_PLAYER_X: i32 = 290;
    pub const DEFAULT_PLAYER_Y: i32 = 300;

    /// Wall boundaries
    pub const WALL_WIDTH: i32 = 500;
    pub const WALL_HEIGHT: i32 = 500;
    pub const LEFT_WALL: i32 = 50;
    pub const TOP_WALL: i32 = 50;
    pub const RIGHT_WALL: i32 = LEFT_WALL + WALL_WIDTH;
    pub const BOTTOM_WALL: i32 = TOP_WALL + WALL_HEIGHT;

    /// Distance under which a fired bullet destroys a bouncing one
    pub const COLLISION_RANGE: f32 = 50.0;

    /// Max wall bounce deflection (degrees, either side)
    pub const BOUNCE_JITTER_DEG: f32 = 15.0;
    /// Max per-axis jitter added when a fired bullet recoils off a hit
    pub const HIT_JITTER: f32 = 1.0;

    /// Direction every bullet starts with (straight up, screen space)
    pub const FIRE_DIRECTION: (f32, f32) = (0.0, -1.0);
}

/// Rotate a vector by `angle` radians (counter-clockwise in y-up space)
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Normalize `v`, keeping `fallback` when `v` has no usable length
#[inline]
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(fallback)
}
