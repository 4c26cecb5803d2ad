//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. The
//! scheduler calls `tick` once per step; nothing in here blocks or keeps
//! state outside `GameState`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::collision::{bullet_hits_player, fired_hits_bouncing, merge_sweep, recoil_direction};
use super::state::{GameEvent, GamePhase, GameState};

/// Held controls for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire key held; only the first held tick shoots
    pub fire: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Frozen until restart
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    advance_fired(state);
    advance_bouncing(state);
    resolve_fired_hits(state);

    if resolve_player_hit(state) {
        return;
    }

    state
        .player
        .step(input.up, input.down, input.left, input.right, &state.tuning);

    fire_on_trigger(state, input);
}

/// Move every fired bullet, running a merge pass after each one.
/// A ripple absorbs at most one bullet per tick across all passes.
fn advance_fired(state: &mut GameState) {
    let ids: Vec<u32> = state.fired.iter().map(|b| b.id).collect();
    let mut merged = HashSet::new();
    for id in ids {
        // Already merged away by an earlier pass this tick
        let Some(bullet) = state.fired.iter_mut().find(|b| b.id == id) else {
            continue;
        };
        bullet.advance(&state.tuning, &mut state.rng);

        for merge in merge_sweep(&mut state.fired, &state.tuning, &mut merged) {
            log::debug!("Bullet {} merged into ripple of {}", merge.removed, merge.into);
            state.events.push(GameEvent::Merge {
                into: merge.into,
                removed: merge.removed,
            });
        }
    }
}

fn advance_bouncing(state: &mut GameState) {
    for bullet in &mut state.bouncing {
        bullet.advance(&state.tuning, &mut state.rng);
    }
}

/// Fired vs bouncing: score hits, recoil the shot, convert spent misses
fn resolve_fired_hits(state: &mut GameState) {
    let range = state.tuning.collision_range;
    let fired = std::mem::take(&mut state.fired);
    let mut survivors = Vec::with_capacity(fired.len());

    for mut bullet in fired {
        let hit = state
            .bouncing
            .iter()
            .position(|threat| fired_hits_bouncing(bullet.pos, threat.pos, range));

        if let Some(index) = hit {
            let threat = state.bouncing.remove(index);
            state.score += 1;
            bullet.dir = recoil_direction(bullet.dir, state.tuning.hit_jitter, &mut state.rng);
            state.events.push(GameEvent::Hit {
                fired: bullet.id,
                destroyed: threat.id,
            });
            survivors.push(bullet);
        } else if !bullet.ripple_active {
            // Missed shot becomes a threat; later shots this tick can already hit it
            let to = state.next_entity_id();
            state.bouncing.push(Bullet::bouncing(to, bullet.pos));
            log::debug!("Bullet {} converted to bouncing {}", bullet.id, to);
            state.events.push(GameEvent::Convert { from: bullet.id, to });
        } else {
            survivors.push(bullet);
        }
    }

    state.fired = survivors;
    state.high_score = state.high_score.max(state.score);
}

/// Bouncing vs player. Returns true if the session just ended.
fn resolve_player_hit(state: &mut GameState) -> bool {
    let caught = state
        .bouncing
        .iter()
        .any(|b| bullet_hits_player(b.pos, &state.player));
    if !caught {
        return false;
    }

    state.phase = GamePhase::GameOver;
    let new_high_score = state.score > state.best_before_session();
    state.high_score = state.high_score.max(state.score);
    state.events.push(GameEvent::GameOver {
        score: state.score,
        new_high_score,
    });
    log::info!(
        "Game over at tick {}: score {}, high score {}",
        state.time_ticks,
        state.score,
        state.high_score
    );
    true
}

/// Edge-triggered fire: one shot per press
fn fire_on_trigger(state: &mut GameState, input: &TickInput) {
    if input.fire && state.can_fire {
        let id = state.spawn_fired(state.player.center());
        state.can_fire = false;
        state.events.push(GameEvent::Shoot { id });
    }
    if !input.fire {
        state.can_fire = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::RIPPLE_DURATION;
    use crate::sim::bullet::fire_direction;
    use crate::tuning::{RipplePolicy, Tuning};
    use glam::{IVec2, Vec2};

    /// Fired bullet whose ripple has run out
    fn spend(state: &mut GameState, id: u32) {
        let bullet = state.fired.iter_mut().find(|b| b.id == id).unwrap();
        bullet.ripple_active = false;
        bullet.ripple_ticks = 0;
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_fire_spawns_at_player_center() {
        let mut state = GameState::new(12345);
        assert_eq!(state.player.pos, IVec2::new(290, 300));

        tick(&mut state, &fire());

        assert_eq!(state.fired.len(), 1);
        let b = &state.fired[0];
        assert_eq!(b.pos, Vec2::new(300.0, 310.0));
        assert_eq!(b.dir, Vec2::new(0.0, -1.0));
        assert!(b.ripple_active);
        assert_eq!(b.ripple_ticks, RIPPLE_DURATION);
        assert_eq!(state.events, vec![GameEvent::Shoot { id: b.id }]);
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut state = GameState::new(1);
        for _ in 0..3 {
            tick(&mut state, &fire());
        }
        assert_eq!(state.fired.len(), 1);

        tick(&mut state, &TickInput::default());
        tick(&mut state, &fire());
        assert_eq!(state.fired.len(), 2);
    }

    #[test]
    fn test_player_hit_distance_9_ends_game() {
        let mut state = GameState::new(1);
        // Moves up 5 before the check, landing 9px right of center (300, 310)
        state.spawn_bouncing(Vec2::new(309.0, 315.0));
        state.score = 4;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 4);
        assert_eq!(
            state.events,
            vec![GameEvent::GameOver {
                score: 4,
                new_high_score: true
            }]
        );
    }

    #[test]
    fn test_player_miss_distance_11() {
        let mut state = GameState::new(1);
        state.spawn_bouncing(Vec2::new(311.0, 315.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let mut state = GameState::new(1);
        state.spawn_bouncing(Vec2::new(300.0, 315.0));
        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());

        let ticks = state.time_ticks;
        let bullets = state.bouncing.clone();
        tick(&mut state, &fire());
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.bouncing, bullets);
        assert!(state.fired.is_empty());

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.bouncing.is_empty());
        tick(&mut state, &fire());
        assert_eq!(state.fired.len(), 1);
    }

    #[test]
    fn test_fired_hits_bouncing_scores() {
        let mut state = GameState::new(42);
        let shot = state.spawn_fired(Vec2::new(300.0, 200.0));
        let threat = state.spawn_bouncing(Vec2::new(320.0, 200.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 1);
        assert_eq!(state.high_score, 1);
        assert!(state.bouncing.is_empty());
        assert_eq!(state.fired.len(), 1);
        // Recoiled: now heading downward
        assert!(state.fired[0].dir.y > 0.0);
        assert!((state.fired[0].dir.length() - 1.0).abs() < 1e-5);
        assert_eq!(
            state.events,
            vec![GameEvent::Hit {
                fired: shot,
                destroyed: threat
            }]
        );
    }

    #[test]
    fn test_one_hit_per_fired_bullet() {
        let mut state = GameState::new(42);
        state.spawn_fired(Vec2::new(300.0, 200.0));
        state.spawn_bouncing(Vec2::new(320.0, 200.0));
        state.spawn_bouncing(Vec2::new(280.0, 200.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 1);
        assert_eq!(state.bouncing.len(), 1);
    }

    #[test]
    fn test_spent_shot_converts_to_bouncing() {
        let mut state = GameState::new(7);
        let id = state.spawn_fired(Vec2::new(100.0, 300.0));
        state.fired[0].ripple_active = false;
        state.fired[0].ripple_ticks = 0;
        state.fired[0].dir = Vec2::new(1.0, 0.0);

        tick(&mut state, &TickInput::default());

        assert!(state.fired.is_empty());
        assert_eq!(state.bouncing.len(), 1);
        let threat = &state.bouncing[0];
        assert_eq!(threat.pos, Vec2::new(105.0, 300.0));
        assert_eq!(threat.dir, fire_direction());
        assert!(!threat.ripple_active);
        assert_eq!(
            state.events,
            vec![GameEvent::Convert {
                from: id,
                to: threat.id
            }]
        );
    }

    #[test]
    fn test_shot_lifecycle_converts_after_ripple() {
        let mut state = GameState::new(7);
        state.player.pos = IVec2::new(100, 500);
        tick(&mut state, &fire());
        let shot = state.fired[0].id;

        // Ripple lasts RIPPLE_DURATION ticks, then one more tick switches it off
        for _ in 0..RIPPLE_DURATION {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.fired.len(), 1);
        }
        tick(&mut state, &TickInput::default());
        assert!(state.fired.is_empty());
        assert_eq!(state.bouncing.len(), 1);
        assert!(state
            .events
            .contains(&GameEvent::Convert { from: shot, to: state.bouncing[0].id }));
    }

    #[test]
    fn test_ripple_merges_inactive_shot() {
        let mut state = GameState::new(9);
        let keeper = state.spawn_fired(Vec2::new(100.0, 300.0));
        state.fired[0].ripple_ticks = 20;
        let spent = state.spawn_fired(Vec2::new(100.0, 320.0));
        state.fired[1].ripple_active = false;
        state.fired[1].ripple_ticks = 0;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.fired.len(), 1);
        assert_eq!(state.fired[0].id, keeper);
        assert!(state.bouncing.is_empty());
        assert_eq!(
            state.events,
            vec![GameEvent::Merge {
                into: keeper,
                removed: spent
            }]
        );
    }

    #[test]
    fn test_ripple_merges_once_per_tick() {
        let mut state = GameState::new(9);
        let keeper = state.spawn_fired(Vec2::new(300.0, 300.0));
        state.fired[0].ripple_ticks = 20;
        let first = state.spawn_fired(Vec2::new(300.0, 280.0));
        let second = state.spawn_fired(Vec2::new(310.0, 290.0));
        spend(&mut state, first);
        spend(&mut state, second);

        tick(&mut state, &TickInput::default());

        // Both sit inside the 33px ripple, but only one is absorbed this tick
        let merges: Vec<&GameEvent> = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Merge { into, .. } if *into == keeper))
            .collect();
        assert_eq!(
            merges,
            vec![&GameEvent::Merge {
                into: keeper,
                removed: first
            }]
        );
        assert_eq!(state.fired.len(), 1);
        // The other spent shot turned into a threat instead
        assert_eq!(state.bouncing.len(), 1);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Convert { from, .. } if *from == second)));
    }

    #[test]
    fn test_converted_shot_is_hittable_same_tick() {
        let mut state = GameState::new(7);
        let spent = state.spawn_fired(Vec2::new(100.0, 300.0));
        spend(&mut state, spent);
        state.fired[0].dir = Vec2::new(1.0, 0.0);
        // Later in the list, still rippling, 16px from where the spent shot lands
        let shot = state.spawn_fired(Vec2::new(100.0, 320.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 1);
        assert!(state.bouncing.is_empty());
        assert_eq!(state.fired.len(), 1);
        assert_eq!(state.fired[0].id, shot);
        let GameEvent::Convert { to, .. } = state.events[0] else {
            panic!("expected a conversion first, got {:?}", state.events);
        };
        assert_eq!(
            state.events[1],
            GameEvent::Hit {
                fired: shot,
                destroyed: to
            }
        );
    }

    #[test]
    fn test_arc_sector_policy_only_merges_above() {
        let tuning = Tuning {
            ripple_policy: RipplePolicy::ArcSector,
            ..Default::default()
        };

        // Below the ripple: inside the radius, outside the half-disc
        let mut state = GameState::with_tuning(9, tuning.clone());
        state.spawn_fired(Vec2::new(100.0, 300.0));
        state.fired[0].ripple_ticks = 20;
        let below = state.spawn_fired(Vec2::new(100.0, 320.0));
        spend(&mut state, below);
        tick(&mut state, &TickInput::default());
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::Merge { .. })));
        assert_eq!(state.bouncing.len(), 1);

        // Above the ripple: absorbed
        let mut state = GameState::with_tuning(9, tuning);
        let keeper = state.spawn_fired(Vec2::new(100.0, 300.0));
        state.fired[0].ripple_ticks = 20;
        let above = state.spawn_fired(Vec2::new(100.0, 280.0));
        spend(&mut state, above);
        tick(&mut state, &TickInput::default());
        assert_eq!(
            state.events,
            vec![GameEvent::Merge {
                into: keeper,
                removed: above
            }]
        );
        assert!(state.bouncing.is_empty());
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut state = GameState::new(1);
        let input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos, IVec2::new(285, 295));
        for _ in 0..100 {
            tick(&mut state, &input);
        }
        assert_eq!(state.player.pos, IVec2::new(50, 50));
    }

    #[test]
    fn test_high_score_survives_restart() {
        let mut state = GameState::new(3);
        state.spawn_fired(Vec2::new(300.0, 200.0));
        state.spawn_bouncing(Vec2::new(320.0, 200.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);

        state.restart();
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 1);

        // A lower score does not count as a new best
        state.spawn_bouncing(Vec2::new(300.0, 315.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(
            state.events,
            vec![GameEvent::GameOver {
                score: 0,
                new_high_score: false
            }]
        );
        assert_eq!(state.high_score, 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            fire(),
            TickInput {
                left: true,
                ..Default::default()
            },
            fire(),
            TickInput::default(),
        ];

        for _ in 0..40 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.fired, state2.fired);
        assert_eq!(state1.bouncing, state2.bouncing);
        assert_eq!(state1.score, state2.score);
    }
}
