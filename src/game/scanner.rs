//! Win detection through the most recently placed piece.
//!
//! Only lines passing through the new piece can have been completed by it, so
//! each check walks outward from that cell along the four axes instead of
//! rescanning the board.

use serde::Serialize;

use super::{Board, Cell, PlayerId};

pub const DEFAULT_WIN_LENGTH: usize = 4;

/// One of the four line directions through a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right, `/`
    DiagonalUp,
    /// Top-left to bottom-right, `\`
    DiagonalDown,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DiagonalUp,
        Axis::DiagonalDown,
    ];

    /// The two opposite (row, col) steps scanned along this axis.
    /// Row steps are negative going up, since row 0 is the top.
    pub fn directions(self) -> [(isize, isize); 2] {
        match self {
            Axis::Horizontal => [(0, -1), (0, 1)],
            Axis::Vertical => [(-1, 0), (1, 0)],
            Axis::DiagonalUp => [(-1, 1), (1, -1)],
            Axis::DiagonalDown => [(-1, -1), (1, 1)],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineScanner {
    win_length: usize,
}

impl LineScanner {
    pub fn new(win_length: usize) -> Self {
        LineScanner { win_length }
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Check if the piece at (row, col) completes a line for `player`
    pub fn check_win(&self, board: &Board, row: usize, col: usize, player: PlayerId) -> bool {
        self.winning_axis(board, row, col, player).is_some()
    }

    /// The first axis through (row, col) holding a winning run for `player`
    pub fn winning_axis(
        &self,
        board: &Board,
        row: usize,
        col: usize,
        player: PlayerId,
    ) -> Option<Axis> {
        // The anchor itself supplies one piece of the run.
        let needed = self.win_length.saturating_sub(1);
        Axis::ALL.into_iter().find(|axis| {
            let [a, b] = axis.directions();
            self.run_length(board, row, col, a, player) + self.run_length(board, row, col, b, player)
                >= needed
        })
    }

    /// Count consecutive `player` cells stepping away from (row, col), not
    /// counting the anchor. Stops at the edge, at any other cell, or once
    /// `win_length - 1` cells have been seen.
    fn run_length(
        &self,
        board: &Board,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
        player: PlayerId,
    ) -> usize {
        let limit = self.win_length.saturating_sub(1);
        let (mut r, mut c) = (row, col);
        let mut count = 0;
        while count < limit {
            let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) else {
                break;
            };
            match board.get(nr, nc) {
                Ok(Cell::Occupied(id)) if id == player => count += 1,
                _ => break,
            }
            (r, c) = (nr, nc);
        }
        count
    }
}

impl Default for LineScanner {
    fn default() -> Self {
        Self::new(DEFAULT_WIN_LENGTH)
    }
}
