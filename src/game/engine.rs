use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use super::{Board, Cell, LineScanner, Player, PlayerId, PlayerRegistry, DEFAULT_WIN_LENGTH};
use crate::config::GameConfig;
use crate::error::{ConfigError, GameError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameStatus {
    InProgress,
    Draw,
    Won(PlayerId),
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Draw => write!(f, "draw"),
            GameStatus::Won(id) => write!(f, "won by player {id}"),
        }
    }
}

/// Owned view of the game handed to listeners after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub board: Board,
    pub status: GameStatus,
    pub current_player_index: usize,
}

impl Snapshot {
    /// Same text as [`GameEngine::status_message`], for listeners that only
    /// hold a snapshot and the player list.
    pub fn status_message(&self, players: &[Player]) -> String {
        status_message(self.status, self.current_player_index, players)
    }
}

/// Where an accepted move landed and what it did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub player: PlayerId,
    pub status: GameStatus,
}

fn status_message(status: GameStatus, current_player_index: usize, players: &[Player]) -> String {
    let name_of = |player: Option<&Player>, fallback: String| {
        player.map_or(fallback, |p| p.name().to_string())
    };
    match status {
        GameStatus::InProgress => {
            let name = name_of(
                players.get(current_player_index),
                format!("Player at turn {current_player_index}"),
            );
            format!("{name}'s turn")
        }
        GameStatus::Won(id) => {
            let name = name_of(players.iter().find(|p| p.id() == id), format!("Player {id}"));
            format!("{name} has won the game!")
        }
        GameStatus::Draw => "Game board full! It's a tie!!".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(&Snapshot)>;

/// Turn-based Connect Four state machine.
///
/// Listeners only ever see a `&Snapshot`, never the engine, so they cannot
/// mutate the game while a notification is being delivered.
pub struct GameEngine {
    board: Board,
    players: PlayerRegistry,
    scanner: LineScanner,
    current_player_index: usize,
    status: GameStatus,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl GameEngine {
    /// Create an engine over an empty `rows x cols` board.
    pub fn new(
        rows: usize,
        cols: usize,
        win_length: usize,
        players: PlayerRegistry,
    ) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::Validation(format!(
                "board must have at least one row and column (got {rows}x{cols})"
            )));
        }
        if win_length == 0 {
            return Err(ConfigError::Validation("win_length must be > 0".into()));
        }
        if players.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "at least 2 players are required (got {})",
                players.len()
            )));
        }

        Ok(GameEngine {
            board: Board::new(rows, cols),
            players,
            scanner: LineScanner::new(win_length),
            current_player_index: 0,
            status: GameStatus::InProgress,
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    /// Build an engine from a validated configuration.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut players = PlayerRegistry::new();
        for player in &config.players {
            players.register(player.name.as_deref(), player.color.as_str());
        }
        Self::new(
            config.board.rows,
            config.board.cols,
            config.board.win_length,
            players,
        )
    }

    /// Standard 6x7 game between "Player 1" (Blue) and "Player 2" (Red).
    pub fn classic() -> Self {
        let mut players = PlayerRegistry::new();
        players.register(None, "Blue");
        players.register(None, "Red");
        GameEngine {
            board: Board::default(),
            players,
            scanner: LineScanner::new(DEFAULT_WIN_LENGTH),
            current_player_index: 0,
            status: GameStatus::InProgress,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        self.board.get(row, col)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.board.dimensions()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn current_player(&self) -> &Player {
        // The index is always reduced modulo the player count, and the
        // constructors guarantee at least two players.
        &self.players.players()[self.current_player_index]
    }

    pub fn players(&self) -> &[Player] {
        self.players.players()
    }

    pub fn win_length(&self) -> usize {
        self.scanner.win_length()
    }

    /// Columns that can still take a piece; empty once the game is over
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..self.board.cols())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            status: self.status,
            current_player_index: self.current_player_index,
        }
    }

    /// One-line description of the game for display
    pub fn status_message(&self) -> String {
        status_message(self.status, self.current_player_index, self.players.players())
    }

    /// Drop the current player's piece into `column`.
    ///
    /// On error nothing changes and no listener is notified.
    pub fn apply_move(&mut self, column: usize) -> Result<Placement, GameError> {
        if self.is_terminal() {
            debug!(column, status = %self.status, "move rejected: game over");
            return Err(GameError::GameOver {
                status: self.status,
            });
        }
        if column >= self.board.cols() {
            debug!(column, cols = self.board.cols(), "move rejected: invalid column");
            return Err(GameError::InvalidColumn {
                column,
                cols: self.board.cols(),
            });
        }

        let player = self.current_player().id();
        let row = self.board.place(column, player).inspect_err(|e| {
            debug!(column, error = %e, "move rejected");
        })?;

        if let Some(axis) = self.scanner.winning_axis(&self.board, row, column, player) {
            self.status = GameStatus::Won(player);
            info!(%player, row, column, ?axis, "game won");
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
            info!(row, column, "game drawn");
        } else {
            self.current_player_index = (self.current_player_index + 1) % self.players.len();
        }
        debug!(%player, row, column, status = %self.status, "move applied");

        self.notify();
        Ok(Placement {
            row,
            column,
            player,
            status: self.status,
        })
    }

    /// Clear the board and start over with the first player. Players are kept.
    pub fn reset(&mut self) {
        self.board.reset();
        self.status = GameStatus::InProgress;
        self.current_player_index = 0;
        info!("game reset");
        self.notify();
    }

    /// Register a listener called after every accepted move and every reset.
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::classic()
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("board", &self.board)
            .field("players", &self.players)
            .field("win_length", &self.scanner.win_length())
            .field("current_player_index", &self.current_player_index)
            .field("status", &self.status)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
