//! Audio dispatch
//!
//! The simulation only reports events; this module maps them to sound
//! effects and hands them to a backend. Playback is fire-and-forget: a
//! failing backend is logged and otherwise ignored.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired a bullet
    Shoot,
    /// A fired bullet destroyed a bouncing one
    Hit,
}

impl SoundEffect {
    /// Effect to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shoot { .. } => Some(SoundEffect::Shoot),
            GameEvent::Hit { .. } => Some(SoundEffect::Hit),
            _ => None,
        }
    }

    /// Conventional asset name for file-based backends
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot.wav",
            SoundEffect::Hit => "hit.wav",
        }
    }
}

/// Why a backend could not play a sound
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    /// Device or context could not be opened
    #[error("audio unavailable: {0}")]
    Unavailable(String),
    /// A specific effect failed to load or play
    #[error("failed to play {}: {reason}", .effect.file_name())]
    Playback { effect: SoundEffect, reason: String },
}

/// Something that can make noise
pub trait AudioBackend {
    /// Start playing `effect` at `volume` (0.0 - 1.0) without blocking
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Backend that only writes to the log; used by the headless binary
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::debug!("play {} at volume {:.2}", effect.file_name(), volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Playback errors swallowed so far
    failures: u32,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend: Some(backend),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            failures: 0,
        }
    }

    /// Manager with no backend; every play is a no-op
    pub fn disabled() -> Self {
        log::warn!("No audio backend - audio disabled");
        Self {
            backend: None,
            master_volume: 0.0,
            sfx_volume: 0.0,
            muted: true,
            failures: 0,
        }
    }

    /// Apply volume and mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.play(effect, vol) {
            self.failures += 1;
            log::warn!("{e}");
        }
    }

    /// Play whatever the last tick asked for
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
