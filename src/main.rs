//! Ripple Defense entry point
//!
//! Runs a headless demo session driven by the autopilot and prints a JSON
//! summary. `RUST_LOG=debug` shows every merge, conversion and sound.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use ripple_defense::audio::{AudioManager, LogBackend};
use ripple_defense::platform::demo::Autopilot;
use ripple_defense::platform::{Key, Session};
use ripple_defense::renderer::{RenderSnapshot, Renderer, shapes};
use ripple_defense::sim::{GameEvent, GameState};
use ripple_defense::{Settings, Tuning};

#[derive(Debug, Parser)]
#[command(name = "ripple-defense")]
#[command(about = "Run a headless Ripple Defense demo and print a JSON summary")]
struct Args {
    /// Ticks to simulate (4000 is one minute of game time)
    #[arg(long, default_value_t = 4000)]
    ticks: u64,
    /// Run seed; falls back to the settings file, then to a random seed
    #[arg(long)]
    seed: Option<u64>,
    /// Settings JSON (audio preferences, tuning override, seed)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Tuning JSON; replaces any tuning in the settings file
    #[arg(long)]
    tuning: Option<PathBuf>,
}

/// Counts what a 2D backend would have to draw
#[derive(Debug, Default)]
struct VertexCounter {
    frames: u64,
    vertices: u64,
}

impl Renderer for VertexCounter {
    fn draw(&mut self, frame: &RenderSnapshot) {
        self.frames += 1;
        self.vertices += shapes::frame(frame).len() as u64;
    }
}

#[derive(Debug, Default, Serialize)]
struct DemoSummary {
    seed: u64,
    ticks: u64,
    sessions: u32,
    final_score: u32,
    high_score: u32,
    shots: u32,
    hits: u32,
    merges: u32,
    conversions: u32,
    avg_vertices_per_frame: u64,
}

impl DemoSummary {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Shoot { .. } => self.shots += 1,
                GameEvent::Hit { .. } => self.hits += 1,
                GameEvent::Merge { .. } => self.merges += 1,
                GameEvent::Convert { .. } => self.conversions += 1,
                GameEvent::Restart => self.sessions += 1,
                GameEvent::GameOver { .. } => {}
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Ripple Defense (headless demo) starting...");

    let args = Args::parse();
    let settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    // An explicit tuning file must be valid; a bad one is a startup error
    let tuning = match &args.tuning {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read tuning: {}", path.display()))?;
            Tuning::from_json(&json)
                .with_context(|| format!("invalid tuning: {}", path.display()))?
        }
        None => settings.effective_tuning(),
    };
    let seed = args
        .seed
        .or(settings.seed)
        .unwrap_or_else(rand::random::<u64>);
    let ticks = args.ticks;
    log::info!("Seed {seed}, {ticks} ticks, ripple policy {:?}", tuning.ripple_policy);

    let mut audio = AudioManager::new(Box::new(LogBackend));
    audio.apply_settings(&settings);

    let mut session = Session::new(GameState::with_tuning(seed, tuning), audio);
    let mut pilot = Autopilot::default();
    let mut renderer = VertexCounter::default();
    let mut summary = DemoSummary {
        seed,
        ticks,
        sessions: 1,
        ..Default::default()
    };

    for _ in 0..ticks {
        if session.state.is_game_over() {
            session.input.press(Key::Restart);
        }
        let input = pilot.next_input(&session.state);
        for (key, down) in [
            (Key::Up, input.up),
            (Key::Down, input.down),
            (Key::Left, input.left),
            (Key::Right, input.right),
            (Key::Fire, input.fire),
        ] {
            if down {
                session.input.press(key);
            } else {
                session.input.release(key);
            }
        }

        session.step_once();
        summary.record(&session.state.events);
        session.draw(&mut renderer);
    }

    summary.final_score = session.state.score;
    summary.high_score = session.state.high_score;
    summary.avg_vertices_per_frame = renderer.vertices / renderer.frames.max(1);

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
