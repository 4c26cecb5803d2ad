//! Autopilot for headless demo runs and soak tests

use glam::Vec2;

use crate::sim::{GameState, TickInput};

/// Drives the player without a human: steps away from the closest threat
/// and taps fire on a fixed cadence.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Ticks between shots
    pub fire_every: u64,
    /// Threats farther than this are ignored
    pub danger_radius: f32,
    ticks: u64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(20, 90.0)
    }
}

impl Autopilot {
    pub fn new(fire_every: u64, danger_radius: f32) -> Self {
        Self {
            fire_every: fire_every.max(2),
            danger_radius,
            ticks: 0,
        }
    }

    /// Input for the next tick of `state`
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        self.ticks += 1;
        let center = state.player.center();

        let threat = state
            .bouncing
            .iter()
            .map(|b| b.pos)
            .filter(|pos| pos.distance(center) < self.danger_radius)
            .min_by(|a, b| a.distance(center).total_cmp(&b.distance(center)));

        let mut input = match threat {
            Some(pos) => flee(center, pos),
            None => home(center, state),
        };
        // Pressed for one tick, released the next, so every tap is a new edge
        input.fire = self.ticks % self.fire_every == 0;
        input
    }
}

/// Step directly away from `threat`
fn flee(center: Vec2, threat: Vec2) -> TickInput {
    let away = center - threat;
    TickInput {
        up: away.y < 0.0,
        down: away.y > 0.0,
        left: away.x < 0.0,
        right: away.x > 0.0,
        fire: false,
    }
}

/// Drift back toward the spawn point when nothing is close
fn home(center: Vec2, state: &GameState) -> TickInput {
    let tuning = &state.tuning;
    let half = tuning.player_size as f32 / 2.0;
    let spawn = Vec2::new(tuning.spawn_x as f32 + half, tuning.spawn_y as f32 + half);
    let to = spawn - center;
    let slack = tuning.player_speed as f32;
    TickInput {
        up: to.y < -slack,
        down: to.y > slack,
        left: to.x < -slack,
        right: to.x > slack,
        fire: false,
    }
}
