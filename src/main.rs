//! Grid Invaders headless driver
//!
//! Runs the frame loop with the autopilot at the controls, forwards sound cues
//! to a logging sink and optionally dumps the final frame as JSON.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use grid_invaders::autopilot::Autopilot;
use grid_invaders::sim::{GameEvent, GameState, TickInput, tick};
use grid_invaders::{AudioManager, FrameView, LogSink, Settings};

/// Frame pacing used with `--realtime`
const FRAME_TIME: Duration = Duration::from_micros(16_667);

#[derive(Parser, Debug)]
#[command(name = "grid-invaders")]
#[command(about = "Run the Grid Invaders simulation headless")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Pace frames at 60 Hz instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print the final frame view as JSON
    #[arg(long)]
    json: bool,
}

/// Everything the frame loop owns
struct Game {
    state: GameState,
    audio: AudioManager,
    pilot: Option<Autopilot>,
    kills: u64,
    best_score: u32,
}

impl Game {
    fn new(settings: &Settings, seed: u64) -> Self {
        let mut audio = AudioManager::new(Some(Box::new(LogSink)));
        audio.set_muted(settings.audio.muted);
        audio.set_master_volume(settings.audio.master_volume);
        audio.set_sfx_volume(settings.audio.sfx_volume);

        Self {
            state: GameState::with_formation_speed(seed, settings.formation_speed),
            audio,
            pilot: settings.autopilot.then(Autopilot::default),
            kills: 0,
            best_score: 0,
        }
    }

    fn read_input(&self, frame: u64, frames: u64) -> TickInput {
        let mut input = self
            .pilot
            .map(|pilot| pilot.next_input(&self.state))
            .unwrap_or_default();
        input.quit = frame + 1 >= frames || !self.state.formation.any_alive();
        input
    }

    /// One frame: input, tick, cues. Returns false once quit was requested.
    fn frame(&mut self, frame: u64, frames: u64) -> bool {
        let input = self.read_input(frame, frames);
        tick(&mut self.state, &input);
        self.audio.play_events(&self.state.events);

        self.kills += self
            .state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::AlienKilled { .. }))
            .count() as u64;
        self.best_score = self.best_score.max(self.state.score);
        !input.quit
    }

    /// Run up to `frames` frames; returns how many actually ran
    fn run(&mut self, frames: u64, realtime: bool) -> u64 {
        let mut frame = 0;
        while frame < frames {
            let deadline = Instant::now() + FRAME_TIME;
            let running = self.frame(frame, frames);
            frame += 1;
            if !running {
                break;
            }
            if realtime {
                std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
            }
        }
        frame
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let seed = args
        .seed
        .or(settings.seed)
        .unwrap_or_else(rand::random::<u64>);
    log::info!("Grid Invaders starting (seed {})", seed);

    let mut game = Game::new(&settings, seed);
    let started = Instant::now();
    let frame = game.run(args.frames, args.realtime);

    log::info!(
        "Stopped after {} frames in {:.2}s: {} games, {} kills, best score {}, {} cues",
        frame,
        started.elapsed().as_secs_f64(),
        game.state.games_started,
        game.kills,
        game.best_score,
        game.audio.played()
    );

    if args.json {
        let view = FrameView::capture(&game.state);
        let json = serde_json::to_string_pretty(&view).context("serializing frame view")?;
        println!("{json}");
    }
    Ok(())
}
