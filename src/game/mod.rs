//! Core Connect Four game logic: board representation, player registry, win
//! detection, and the turn-based engine that ties them together.

mod board;
mod engine;
mod player;
mod scanner;

pub use board::{Board, Cell, DEFAULT_COLS, DEFAULT_ROWS};
pub use engine::{GameEngine, GameStatus, Listener, ListenerId, Placement, Snapshot};
pub use player::{Player, PlayerId, PlayerRegistry};
pub use scanner::{Axis, LineScanner, DEFAULT_WIN_LENGTH};
