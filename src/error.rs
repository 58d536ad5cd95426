use crate::board::Player;

/// Errors produced by the game core
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid move, column {column} is full or out of range. Columns must be between 1 and {columns}")]
    InvalidColumn { column: usize, columns: usize },

    #[error("Malformed board: {0}")]
    MalformedBoard(String),

    #[error("Invalid game configuration: {0}")]
    Config(String),

    #[error("No free columns left to play")]
    NoFreeColumns,

    #[error("The game is already over")]
    GameOver,

    #[error("No input available for player {0}")]
    NoInput(Player),
}

pub type Result<T> = std::result::Result<T, Error>;
