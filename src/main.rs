mod audio;
mod canvas;
mod clock;
mod config;
mod food;
mod game;
mod input;
mod particles;
mod render;
mod snake;
// Only cues survive a build without the audio backend
#[cfg_attr(not(feature = "audio"), allow(dead_code))]
mod synth;
mod term;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::canvas::PixelCanvas;
use crate::config::GameConfig;
use crate::game::{Flow, SnakeGame};
use crate::term::TermManager;

/// A grid cell, (column, row). May point off the grid mid-move.
pub type Coords = (i32, i32);

#[derive(Parser)]
#[command(name = "metal-snake")]
#[command(version, about = "Retro arcade snake for the terminal")]
struct Cli {
    /// Playfield width in cells
    #[arg(long, default_value = "20")]
    grid_width: i32,

    /// Playfield height in cells
    #[arg(long, default_value = "15")]
    grid_height: i32,

    /// Frames per second
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Milliseconds of game time between snake moves
    #[arg(long, default_value = "100")]
    move_interval_ms: u64,

    /// Run without sound
    #[arg(long)]
    mute: bool,

    /// Write logs here (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = GameConfig {
        grid_width: cli.grid_width,
        grid_height: cli.grid_height,
        fps: cli.fps,
        move_interval: Duration::from_millis(cli.move_interval_ms),
        ..Default::default()
    };
    config.validate().context("Invalid game settings")?;

    let audio = audio::open(&config, cli.mute);
    let mut game = SnakeGame::new(config, audio, StdRng::from_entropy());

    let mut term = TermManager::new();
    term.setup()?;

    // Always hand the terminal back, even when the loop fails
    let result = run(&mut game, &mut term);
    term.restore()?;

    info!("bye");
    result
}

fn run(game: &mut SnakeGame, term: &mut TermManager) -> Result<()> {
    let (w, h) = game.config().canvas_size();
    let frame = game.config().frame_duration();
    let mut canvas = PixelCanvas::new(w, h);

    loop {
        let frame_start = Instant::now();

        for key_ev in term.read_key_events_queue()? {
            if let Some(action) = input::action_for(&key_ev) {
                if game.handle_action(action) == Flow::Exit {
                    return Ok(());
                }
            }
        }

        game.update();

        render::draw(&mut canvas, game);
        term.present(&canvas.compose(), canvas.cell_size().0)?;

        sleep(frame.saturating_sub(frame_start.elapsed()));
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
