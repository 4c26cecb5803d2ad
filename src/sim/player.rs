//! The player's sprite: integer position, held-key movement, wall clamping

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Player position is the top-left corner of a `size` x `size` box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
    pub size: i32,
}

impl Player {
    /// Player at the configured spawn point
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: IVec2::new(tuning.spawn_x, tuning.spawn_y),
            size: tuning.player_size,
        }
    }

    /// Center of the sprite, where bullets are fired from and hits are measured to
    pub fn center(&self) -> Vec2 {
        self.pos.as_vec2() + Vec2::splat(self.size as f32 / 2.0)
    }

    /// Apply one tick of held movement keys, then clamp inside the walls
    pub fn step(&mut self, up: bool, down: bool, left: bool, right: bool, tuning: &Tuning) {
        let speed = tuning.player_speed;
        if up {
            self.pos.y -= speed;
        }
        if down {
            self.pos.y += speed;
        }
        if left {
            self.pos.x -= speed;
        }
        if right {
            self.pos.x += speed;
        }
        self.clamp_to_walls(tuning);
    }

    pub fn clamp_to_walls(&mut self, tuning: &Tuning) {
        let (max_x, max_y) = tuning.player_max();
        self.pos = self
            .pos
            .clamp(IVec2::new(tuning.left_wall, tuning.top_wall), IVec2::new(max_x, max_y));
    }
}
