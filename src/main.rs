mod config;
mod error;
mod food;
mod frontend;
mod game;
mod grid;
mod snake;
mod term;

use std::{fs::File, process::exit, sync::Mutex};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Args;
use crate::error::GameError;
use crate::game::SnakeGame;
use crate::term::{SleepPacer, TermInput, TermRenderer};

/// Screen-unit coordinate. Cells are addressed by their top-left corner.
pub type Coord = i32;

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_file) {
        eprintln!("Could not open log file {}: {}", args.log_file, e);
        exit(1);
    }

    if let Err(e) = run(args) {
        error!(error = %e, "game aborted");
        eprintln!("wrapsnake: {}", e);
        exit(1);
    }
}

fn run(args: Args) -> Result<(), GameError> {
    let seed = args.seed;
    let settings = args.into_settings()?;
    info!(?settings, "starting");

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    // Checked first so a board that cannot be shown is rejected before it is built
    let mut renderer = TermRenderer::new(settings.grid, settings.palette)?;
    let mut game = SnakeGame::new(settings, rng)?;

    // The terminal has to be restored no matter how the loop ended
    let res = renderer
        .setup()
        .and_then(|()| game.run(&mut TermInput, &mut renderer, &mut SleepPacer::new()));
    let restored = renderer.restore();

    info!(length = game.snake().len(), "finished");
    res.and(restored)
}

fn init_logging(path: &str) -> std::io::Result<()> {
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "wrapsnake=info".into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
