//! Collision and merge rules between bullets and the player
//!
//! All checks are plain point-distance tests. Sweeps never mutate a
//! collection while scanning it: they mark removals against the current
//! snapshot and filter afterwards.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;

use super::bullet::Bullet;
use super::player::Player;
use crate::{distance, normalize_or};
use crate::tuning::Tuning;

/// A bullet absorbed into an active ripple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    /// Ripple owner that survives
    pub into: u32,
    /// Bullet removed from the collection
    pub removed: u32,
}

/// Whether a fired bullet is close enough to destroy a bouncing one
#[inline]
pub fn fired_hits_bouncing(fired: Vec2, bouncing: Vec2, range: f32) -> bool {
    distance(fired, bouncing) < range
}

/// Whether a bullet has reached the player's body
#[inline]
pub fn bullet_hits_player(bullet: Vec2, player: &Player) -> bool {
    distance(bullet, player.center()) < player.size as f32 / 2.0
}

/// Heading of a fired bullet after it knocks out a threat: reversed,
/// jittered per axis by up to `jitter`, then re-normalized
pub fn recoil_direction(dir: Vec2, jitter: f32, rng: &mut impl Rng) -> Vec2 {
    let offset = if jitter > 0.0 {
        Vec2::new(
            rng.random_range(-jitter..jitter),
            rng.random_range(-jitter..jitter),
        )
    } else {
        Vec2::ZERO
    };
    normalize_or(-dir + offset, normalize_or(-dir, super::bullet::fire_direction()))
}

/// One ripple-merge pass over a single collection.
///
/// Each bullet with an active ripple absorbs at most one bullet whose ripple
/// is inactive. Ripple owners listed in `merged` are skipped and every new
/// owner is added, so sharing the set across passes caps a tick at one merge
/// per ripple. Returns the merges in scan order.
pub fn merge_sweep(
    bullets: &mut Vec<Bullet>,
    tuning: &Tuning,
    merged: &mut HashSet<u32>,
) -> Vec<Merge> {
    let mut removed = vec![false; bullets.len()];
    let mut merges = Vec::new();

    for (a, rippler) in bullets.iter().enumerate() {
        // Removed bullets are always ripple-inactive, so `a` is never one of them
        if !rippler.ripple_active || merged.contains(&rippler.id) {
            continue;
        }
        for (b, other) in bullets.iter().enumerate() {
            if a == b || removed[b] || other.ripple_active {
                continue;
            }
            if rippler.is_touching_ripple(other, tuning) {
                removed[b] = true;
                merged.insert(rippler.id);
                merges.push(Merge {
                    into: rippler.id,
                    removed: other.id,
                });
                break;
            }
        }
    }

    if !merges.is_empty() {
        let mut flags = removed.into_iter();
        bullets.retain(|_| !flags.next().unwrap_or(false));
    }
    merges
}
