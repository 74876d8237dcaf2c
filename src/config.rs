use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::grid::Grid;

pub const DEFAULT_WIDTH: i32 = 640;
pub const DEFAULT_HEIGHT: i32 = 480;
pub const DEFAULT_CELL_SIZE: i32 = 20;
pub const DEFAULT_TICK_RATE: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid number: {value:?}")]
    NotANumber { var: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("board needs at least two cells")]
    TooFewCells,

    #[error("board {width}x{height} is not a whole number of {cell_size}px cells")]
    Misaligned { width: i32, height: i32, cell_size: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Board width in pixels.
    pub width: i32,
    /// Board height in pixels.
    pub height: i32,
    pub cell_size: i32,
    /// Game updates per second.
    pub tick_rate: u32,
    /// Fixed seed for food placement. Random when unset.
    pub seed: Option<u64>,
    /// Where to write logs. Logging is off when unset, the terminal belongs to the game.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            tick_rate: DEFAULT_TICK_RATE,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Defaults overridden by `SNAKE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Config::default();

        let config = Config {
            width: parse_var(&lookup, "SNAKE_WIDTH")?.unwrap_or(defaults.width),
            height: parse_var(&lookup, "SNAKE_HEIGHT")?.unwrap_or(defaults.height),
            cell_size: parse_var(&lookup, "SNAKE_CELL_SIZE")?.unwrap_or(defaults.cell_size),
            tick_rate: parse_var(&lookup, "SNAKE_TICK_RATE")?.unwrap_or(defaults.tick_rate),
            seed: parse_var(&lookup, "SNAKE_SEED")?,
            log_file: lookup("SNAKE_LOG_FILE").filter(|s| !s.is_empty()).map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::NotPositive("cell size"));
        }
        if self.width <= 0 {
            return Err(ConfigError::NotPositive("board width"));
        }
        if self.height <= 0 {
            return Err(ConfigError::NotPositive("board height"));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::NotPositive("tick rate"));
        }
        if self.width % self.cell_size != 0 || self.height % self.cell_size != 0 {
            return Err(ConfigError::Misaligned {
                width: self.width,
                height: self.height,
                cell_size: self.cell_size,
            });
        }

        if self.grid().total_cells() < 2 {
            return Err(ConfigError::TooFewCells);
        }

        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.cell_size, self.width, self.height)
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value.trim().parse()
            .map(Some)
            .map_err(|_| ConfigError::NotANumber { var, value }),
    }
}
