//! Platform glue between a host loop and the simulation
//!
//! - Fixed-step scheduling from wall-clock time
//! - Held-key input tracking
//! - A `Session` that ticks, plays audio, and restarts between ticks

pub mod demo;

use std::time::Duration;

use crate::audio::AudioManager;
use crate::consts::MAX_SUBSTEPS;
use crate::renderer::{RenderSnapshot, Renderer};
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Longest frame gap fed to the accumulator (avoids a spiral after a stall)
const MAX_FRAME_GAP: Duration = Duration::from_millis(100);

/// Turns elapsed wall time into a number of whole ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
}

impl FixedStep {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            step: Duration::from_millis(tick_ms.max(1)),
            accumulator: Duration::ZERO,
        }
    }

    /// Add `elapsed` and return how many ticks are due, at most `MAX_SUBSTEPS`
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.min(MAX_FRAME_GAP);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }

    /// Drop pending time, e.g. after the window regains focus
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    /// Only honored while the session is over
    Restart,
}

/// Tracks which keys are held between host events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: TickInput,
    restart: bool,
}

impl InputState {
    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Up => self.held.up = down,
            Key::Down => self.held.down = down,
            Key::Left => self.held.left = down,
            Key::Right => self.held.right = down,
            Key::Fire => self.held.fire = down,
            // One-shot: cleared when consumed, not on release
            Key::Restart => self.restart |= down,
        }
    }

    /// Level snapshot for the next tick
    pub fn tick_input(&self) -> TickInput {
        self.held
    }

    /// Forget everything held, e.g. on focus loss
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }
}

/// One running game plus its scheduler, input and audio
pub struct Session {
    pub state: GameState,
    pub input: InputState,
    pub audio: AudioManager,
    step: FixedStep,
}

impl Session {
    pub fn new(state: GameState, audio: AudioManager) -> Self {
        let step = FixedStep::new(state.tuning.tick_ms);
        Self {
            state,
            input: InputState::default(),
            audio,
            step,
        }
    }

    /// Feed wall time; runs every tick that is due. Returns ticks run.
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        let due = self.step.advance(elapsed);
        for _ in 0..due {
            self.step_once();
        }
        due
    }

    /// Run exactly one step with the current input. A pending restart after
    /// game over takes the whole step, so its `Restart` event stays visible.
    pub fn step_once(&mut self) {
        if self.input.take_restart() && self.state.is_game_over() {
            self.state.restart();
            self.audio.handle_events(&self.state.events);
            return;
        }

        let input = self.input.tick_input();
        tick(&mut self.state, &input);
        self.audio.handle_events(&self.state.events);

        for event in &self.state.events {
            if let GameEvent::GameOver {
                new_high_score: true,
                score,
            } = event
            {
                log::info!("New high score: {score}");
            }
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    /// Hand the current frame to a drawing backend
    pub fn draw(&self, renderer: &mut impl Renderer) {
        renderer.draw(&self.snapshot());
    }

    /// Host lost focus: release keys and drop pending time
    pub fn suspend(&mut self) {
        self.input.clear();
        self.step.reset();
    }
}
