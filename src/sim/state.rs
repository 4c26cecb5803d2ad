//! Game session state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::player::Player;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// A bouncing bullet reached the player; waits for restart
    GameOver,
}

/// Something that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player fired a bullet
    Shoot { id: u32 },
    /// A fired bullet destroyed a bouncing one
    Hit { fired: u32, destroyed: u32 },
    /// An inactive fired bullet was swallowed by an active ripple
    Merge { into: u32, removed: u32 },
    /// A spent fired bullet turned into a threat
    Convert { from: u32, to: u32 },
    /// Session ended
    GameOver { score: u32, new_high_score: bool },
    /// Session was reset
    Restart,
}

/// Complete session state. Owned by the scheduler and mutated only by
/// `tick` and `restart`.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Injected randomness for bounces and recoil jitter
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Best score this process has seen; survives restarts
    pub high_score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Player-launched bullets (may carry a ripple)
    pub fired: Vec<Bullet>,
    /// Threat bullets bouncing around the walls
    pub bouncing: Vec<Bullet>,
    /// False while the fire key is still held after a shot
    pub can_fire: bool,
    /// Events produced by the most recent tick (or restart)
    pub events: Vec<GameEvent>,
    /// High score when the current session began
    session_best: u32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session; `tuning` is expected to be validated already
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::spawn(&tuning),
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            high_score: 0,
            time_ticks: 0,
            fired: Vec::new(),
            bouncing: Vec::new(),
            can_fire: true,
            events: Vec::new(),
            session_best: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a ripple-armed bullet at `pos`
    pub fn spawn_fired(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.fired
            .push(Bullet::fired(id, pos, self.tuning.ripple_duration));
        id
    }

    /// Add a threat bullet at `pos`
    pub fn spawn_bouncing(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.bouncing.push(Bullet::bouncing(id, pos));
        id
    }

    /// High score as it stood when this session started
    pub fn best_before_session(&self) -> u32 {
        self.session_best
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Reset everything except the high score and resume play.
    /// Call between ticks only.
    pub fn restart(&mut self) {
        self.fired.clear();
        self.bouncing.clear();
        self.player = Player::spawn(&self.tuning);
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.can_fire = true;
        self.session_best = self.high_score;
        self.events.clear();
        self.events.push(GameEvent::Restart);
        log::info!("Session restarted (high score {})", self.high_score);
    }
}
