use std::fmt;

use serde::Serialize;

use super::PlayerId;
use crate::error::GameError;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    Empty,
    Occupied(PlayerId),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The player holding this cell, if any
    pub fn owner(self) -> Option<PlayerId> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(id) => Some(id),
        }
    }
}

/// Fixed-size grid stored row-major. Row 0 is the top, row `rows - 1` the
/// bottom; pieces fall towards the bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GameError> {
        if row >= self.rows || col >= self.cols {
            return Err(GameError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Check if a column is full. Columns outside the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.get(0, col).map_or(true, |cell| !cell.is_empty())
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn place(&mut self, col: usize, player: PlayerId) -> Result<usize, GameError> {
        if col >= self.cols {
            return Err(GameError::InvalidColumn {
                column: col,
                cols: self.cols,
            });
        }
        if self.is_column_full(col) {
            return Err(GameError::ColumnFull { column: col });
        }

        for row in (0..self.rows).rev() {
            let i = self.index(row, col)?;
            if self.cells[i].is_empty() {
                self.cells[i] = Cell::Occupied(player);
                return Ok(row);
            }
        }

        Err(GameError::ColumnFull { column: col })
    }

    /// Check if the board is completely full.
    ///
    /// Columns fill bottom-up, so a full top row means a full board.
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".".to_string(),
                    Cell::Occupied(id) => id.to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let footer: Vec<String> = (0..self.cols).map(|col| col.to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(n: u32) -> PlayerId {
        PlayerId::new(n).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.dimensions(), (6, 7));
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                assert_eq!(board.get(row, col), Ok(Cell::Empty));
            }
        }
    }

    #[test]
    fn test_place() {
        let mut board = Board::default();

        let row = board.place(3, p(1)).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Ok(Cell::Occupied(p(1))));

        let row = board.place(3, p(2)).unwrap();
        assert_eq!(row, 4); // On top of the first piece
        assert_eq!(board.get(4, 3), Ok(Cell::Occupied(p(2))));
    }

    #[test]
    fn test_place_never_skips_empty_cells() {
        let mut board = Board::new(4, 3);
        for expected in (0..4).rev() {
            assert_eq!(board.place(1, p(1)), Ok(expected));
        }
        for row in 0..4 {
            assert_eq!(board.get(row, 0), Ok(Cell::Empty));
            assert_eq!(board.get(row, 2), Ok(Cell::Empty));
        }
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::default();
        for _ in 0..board.rows() {
            board.place(0, p(1)).unwrap();
        }

        let before = board.clone();
        assert!(board.is_column_full(0));
        assert_eq!(
            board.place(0, p(2)),
            Err(GameError::ColumnFull { column: 0 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::default();
        assert_eq!(
            board.place(7, p(1)),
            Err(GameError::InvalidColumn { column: 7, cols: 7 })
        );
        assert!(board.is_column_full(7));
        assert_eq!(board.occupied(), 0);
    }

    #[test]
    fn test_get_out_of_range() {
        let board = Board::default();
        assert_eq!(
            board.get(6, 0),
            Err(GameError::OutOfRange {
                row: 6,
                col: 0,
                rows: 6,
                cols: 7
            })
        );
        assert!(board.get(0, 7).is_err());
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::default();
        for col in 0..board.cols() {
            assert!(!board.is_full());
            for _ in 0..board.rows() {
                board.place(col, p(1)).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.occupied(), 42);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut board = Board::default();
        board.place(0, p(1)).unwrap();
        board.place(6, p(2)).unwrap();
        board.reset();
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(2, 3);
        board.place(1, p(1)).unwrap();
        board.place(1, p(2)).unwrap();
        board.place(2, p(1)).unwrap();
        assert_eq!(board.to_string(), ". 2 .\n. 1 1\n0 1 2");
    }
}
