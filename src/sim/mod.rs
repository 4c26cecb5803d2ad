//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per `tick` call
//! - Seeded RNG only
//! - Collections are never mutated while they are being scanned
//! - No rendering, audio or platform dependencies

pub mod arc;
pub mod bullet;
pub mod collision;
pub mod player;
pub mod state;
pub mod tick;

pub use arc::ArcSegment;
pub use bullet::Bullet;
pub use collision::{Merge, bullet_hits_player, fired_hits_bouncing, merge_sweep};
pub use player::Player;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
