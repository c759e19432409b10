use std::path::PathBuf;

use crate::game::GameStatus;

/// Errors returned by the game engine and its components.
///
/// Every variant is a rejected request; none of them leaves the board or the
/// game state modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("column {column} is outside the board (0..{cols})")]
    InvalidColumn { column: usize, cols: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("game is over ({status})")]
    GameOver { status: GameStatus },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("no player at turn index {index} ({count} registered)")]
    UnknownPlayer { index: usize, count: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PlayerId;

    #[test]
    fn test_invalid_column_display() {
        let err = GameError::InvalidColumn { column: 9, cols: 7 };
        assert_eq!(err.to_string(), "column 9 is outside the board (0..7)");
    }

    #[test]
    fn test_game_over_display() {
        let err = GameError::GameOver {
            status: GameStatus::Won(PlayerId::new(2).unwrap()),
        };
        assert_eq!(err.to_string(), "game is over (won by player 2)");

        let err = GameError::GameOver {
            status: GameStatus::Draw,
        };
        assert_eq!(err.to_string(), "game is over (draw)");
    }

    #[test]
    fn test_out_of_range_display() {
        let err = GameError::OutOfRange {
            row: 6,
            col: 0,
            rows: 6,
            cols: 7,
        };
        assert_eq!(err.to_string(), "cell (6, 0) is outside the 6x7 board");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("board.rows must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: board.rows must be > 0"
        );
    }
}
