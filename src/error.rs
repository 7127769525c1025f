//! Error types for moves, sessions and configuration.

use std::path::PathBuf;

use derive_more::{Display, Error};

use crate::board::COLS;

/// A rejected drop. The board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Column index outside `0..COLS`
    #[display("column {col} is outside the board (0..{})", COLS)]
    InvalidColumn { col: usize },
    /// Column in range but its top cell is occupied
    #[display("column {col} is full")]
    ColumnFull { col: usize },
    /// Only a player's piece can be dropped
    #[display("cannot drop an empty cell into column {col}")]
    EmptyPiece { col: usize },
}

/// Reasons a session refuses a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    #[display("illegal move: {source}")]
    Move { source: MoveError },
    #[display("the game is over")]
    GameOver,
    #[display("it is not the human player's turn")]
    NotHumanTurn,
    #[display("it is not the machine's turn")]
    NotMachineTurn,
}

impl From<MoveError> for SessionError {
    fn from(source: MoveError) -> Self {
        SessionError::Move { source }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("failed to read config file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[display("failed to parse TOML: {source}")]
    TomlParse { source: toml::de::Error },

    #[display("config validation error: {reason}")]
    Validation { reason: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(source: toml::de::Error) -> Self {
        ConfigError::TomlParse { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        assert_eq!(
            MoveError::InvalidColumn { col: 9 }.to_string(),
            "column 9 is outside the board (0..7)"
        );
        assert_eq!(MoveError::ColumnFull { col: 3 }.to_string(), "column 3 is full");
        assert_eq!(
            MoveError::EmptyPiece { col: 1 }.to_string(),
            "cannot drop an empty cell into column 1"
        );
    }

    #[test]
    fn test_session_error_wraps_move_error() {
        let err: SessionError = MoveError::ColumnFull { col: 2 }.into();
        assert_eq!(err.to_string(), "illegal move: column 2 is full");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation {
            reason: "depth must be between 1 and 8".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "config validation error: depth must be between 1 and 8"
        );
    }
}
