use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("no free cell left for food")]
    NoRoomForFood,

    #[error("board of {cells_wide}x{cells_high} cells cannot be shown in a terminal")]
    BoardTooLarge { cells_wide: i32, cells_high: i32 },

    /// The framed board does not fit in the current terminal.
    #[error("terminal is {have_cols}x{have_rows}, the board needs at least {need_cols}x{need_rows}")]
    TerminalTooSmall { have_cols: u16, have_rows: u16, need_cols: u16, need_rows: u16 },
}

pub type Result<T> = std::result::Result<T, Error>;
