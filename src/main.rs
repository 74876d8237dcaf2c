mod config;
mod error;
mod food;
mod game;
mod grid;
mod input;
mod render;
mod snake;
mod term;

use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{anyhow, Context};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

use config::Config;
use game::SnakeGame;
use input::Keyboard;
use term::TermManager;

/// A pixel-aligned board position.
pub type Coords = (i32, i32);

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("reading SNAKE_* settings")?;

    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }

    let mut term = TermManager::new(&config.grid())?;
    term.setup()?;

    // The terminal is restored when the game (and the TermManager it owns) drops
    let mut game = SnakeGame::new(&config, term)?;
    game.run(&mut Keyboard)?;

    Ok(())
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}
