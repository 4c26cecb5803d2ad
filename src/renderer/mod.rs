//! Rendering contract
//!
//! Each tick the simulation is flattened into a `RenderSnapshot`: an owned,
//! read-only copy a drawing backend can consume without touching
//! `GameState`. `shapes` turns a snapshot into triangle-list vertices.

pub mod shapes;
pub mod vertex;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_HEIGHT, FRAME_WIDTH, RIPPLE_RINGS};
use crate::sim::{Bullet, GameState};

pub use vertex::Vertex;

/// Drawable state of one bullet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletSprite {
    pub pos: Vec2,
    /// Ripple ring radii (innermost first) while the ripple is active
    pub rings: Option<[f32; RIPPLE_RINGS]>,
}

impl BulletSprite {
    fn from_bullet(bullet: &Bullet, ripple_duration: u32) -> Self {
        Self {
            pos: bullet.pos,
            rings: bullet.ring_radii(ripple_duration),
        }
    }
}

/// Everything a backend needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// Window size in pixels: width, height
    pub frame_size: [i32; 2],
    /// Top-left corner of the player sprite
    pub player_pos: IVec2,
    pub player_size: i32,
    pub bullet_size: f32,
    /// Wall rectangle: left, top, width, height
    pub walls: [i32; 4],
    pub fired: Vec<BulletSprite>,
    pub bouncing: Vec<BulletSprite>,
    pub score: u32,
    pub high_score: u32,
    /// Backend should show the overlay and a restart affordance
    pub game_over: bool,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let tuning = &state.tuning;
        let sprites = |bullets: &[Bullet]| -> Vec<BulletSprite> {
            bullets
                .iter()
                .map(|b| BulletSprite::from_bullet(b, tuning.ripple_duration))
                .collect()
        };
        Self {
            frame_size: [FRAME_WIDTH, FRAME_HEIGHT],
            player_pos: state.player.pos,
            player_size: state.player.size,
            bullet_size: tuning.bullet_size,
            walls: [
                tuning.left_wall,
                tuning.top_wall,
                tuning.wall_width,
                tuning.wall_height,
            ],
            fired: sprites(&state.fired),
            bouncing: sprites(&state.bouncing),
            score: state.score,
            high_score: state.high_score,
            game_over: state.is_game_over(),
        }
    }

    /// HUD text lines, top-left corner
    pub fn hud_lines(&self) -> [String; 2] {
        [
            format!("Score: {}", self.score),
            format!("High Score: {}", self.high_score),
        ]
    }
}

/// A drawing backend. Receives one snapshot per tick.
pub trait Renderer {
    fn draw(&mut self, frame: &RenderSnapshot);
}
