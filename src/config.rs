use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_WIN_LENGTH};

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub players: Vec<PlayerConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    /// Pieces in a row needed to win
    pub win_length: usize,
}

/// A player entry. Players take turns in the order they are listed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerConfig {
    /// Display name; "Player <id>" when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub color: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            win_length: DEFAULT_WIN_LENGTH,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board: BoardConfig::default(),
            players: vec![
                PlayerConfig {
                    name: None,
                    color: "Blue".into(),
                },
                PlayerConfig {
                    name: None,
                    color: "Red".into(),
                },
            ],
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows == 0 {
            return Err(ConfigError::Validation("board.rows must be > 0".into()));
        }
        if self.board.cols == 0 {
            return Err(ConfigError::Validation("board.cols must be > 0".into()));
        }
        if self.board.win_length == 0 {
            return Err(ConfigError::Validation(
                "board.win_length must be > 0".into(),
            ));
        }
        if self.board.win_length > self.board.rows.max(self.board.cols) {
            return Err(ConfigError::Validation(format!(
                "board.win_length must fit on a {}x{} board",
                self.board.rows, self.board.cols
            )));
        }

        if self.players.len() < 2 {
            return Err(ConfigError::Validation(
                "at least 2 players are required".into(),
            ));
        }
        if let Some(i) = self
            .players
            .iter()
            .position(|p| p.color.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "players[{i}].color must not be empty"
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&GameConfig::default()).expect("default config serializes")
    }
}
