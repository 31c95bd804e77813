use std::ops::Range;

use super::player::Player;
use super::state::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of aligned pieces needed to win.
pub const WIN_LENGTH: usize = 4;

/// Scan directions as (row delta, col delta): horizontal, vertical,
/// diagonal down-right, anti-diagonal (up-right).
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// A (row, col) position; row 0 is the top.
pub type Position = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// The player whose piece occupies this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Lowest empty row in `col`, scanning from the bottom up.
    /// `None` when the column is full or out of range.
    pub fn top_empty_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        self.top_empty_row(col).is_none()
    }

    /// Drop a piece in a column, returns the row where it landed.
    /// A rejected drop leaves the board untouched.
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        let row = self.top_empty_row(col).ok_or(MoveError::ColumnFull)?;
        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Whether `cell` has four in a row anywhere on the board.
    pub fn check_win(&self, cell: Cell) -> bool {
        self.winning_line(cell).is_some()
    }

    /// First four-in-a-row of `cell`, scanning horizontal, vertical,
    /// diagonal down-right, then anti-diagonal. Every starting position
    /// is visited once per direction.
    pub fn winning_line(&self, cell: Cell) -> Option<[Position; WIN_LENGTH]> {
        if cell == Cell::Empty {
            return None;
        }

        for (dr, dc) in DIRECTIONS {
            for row in start_range(dr, ROWS) {
                for col in start_range(dc, COLS) {
                    let line = line_from(row, col, dr, dc);
                    if line.iter().all(|&(r, c)| self.cells[r][c] == cell) {
                        return Some(line);
                    }
                }
            }
        }

        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Valid starting indices along one axis for a line moving by `delta`.
fn start_range(delta: isize, len: usize) -> Range<usize> {
    match delta {
        1 => 0..len - (WIN_LENGTH - 1),
        -1 => (WIN_LENGTH - 1)..len,
        _ => 0..len,
    }
}

fn line_from(row: usize, col: usize, dr: isize, dc: isize) -> [Position; WIN_LENGTH] {
    std::array::from_fn(|i| {
        let step = i as isize;
        (
            (row as isize + dr * step) as usize,
            (col as isize + dc * step) as usize,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a board from rows of text, top row first.
    /// `R` = red, `Y` = yellow, anything else empty.
    fn board_from(rows: [&str; ROWS]) -> Board {
        let mut board = Board::new();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate().take(COLS) {
                board.cells[r][c] = match ch {
                    'R' => Cell::Red,
                    'Y' => Cell::Yellow,
                    _ => Cell::Empty,
                };
            }
        }
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_top_empty_row_tracks_column_height() {
        let mut board = Board::new();
        assert_eq!(board.top_empty_row(2), Some(5));
        board.drop_piece(2, Cell::Red).unwrap();
        assert_eq!(board.top_empty_row(2), Some(4));
        assert_eq!(board.top_empty_row(COLS), None);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        // Drop first piece in column 3
        let row = board.drop_piece(3, Cell::Red).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::Red);

        // Drop second piece in same column
        let row = board.drop_piece(3, Cell::Yellow).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Cell::Yellow);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();

        // Fill column 0
        for expected in (0..ROWS).rev() {
            assert_eq!(board.drop_piece(0, Cell::Red), Ok(expected));
        }

        assert!(board.is_column_full(0));
        assert_eq!(board.top_empty_row(0), None);

        let before = board;
        assert_eq!(board.drop_piece(0, Cell::Yellow), Err(MoveError::ColumnFull));
        assert_eq!(board, before);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(board.drop_piece(7, Cell::Red), Err(MoveError::InvalidColumn));
        assert!(board.is_column_full(7));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, Cell::Red).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.piece_count(), ROWS * COLS);
    }

    #[test]
    fn test_empty_board_has_no_win() {
        let board = Board::new();
        assert!(!board.check_win(Cell::Red));
        assert!(!board.check_win(Cell::Yellow));
        assert!(!board.check_win(Cell::Empty));
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        // Create horizontal line at bottom row
        for col in 0..4 {
            board.drop_piece(col, Cell::Red).unwrap();
        }
        assert!(board.check_win(Cell::Red));
        assert!(!board.check_win(Cell::Yellow));
        assert_eq!(
            board.winning_line(Cell::Red),
            Some([(5, 0), (5, 1), (5, 2), (5, 3)])
        );
    }

    #[test]
    fn test_horizontal_win_at_right_edge() {
        let board = board_from([
            ".......", ".......", ".......", ".......", ".......", "...YYYY",
        ]);
        assert_eq!(
            board.winning_line(Cell::Yellow),
            Some([(5, 3), (5, 4), (5, 5), (5, 6)])
        );
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        // Create vertical line in column 3
        for _ in 0..4 {
            board.drop_piece(3, Cell::Yellow).unwrap();
        }
        assert!(board.check_win(Cell::Yellow));
        assert_eq!(
            board.winning_line(Cell::Yellow),
            Some([(2, 3), (3, 3), (4, 3), (5, 3)])
        );
    }

    #[test]
    fn test_vertical_win_at_top() {
        let board = board_from([
            "R......", "R......", "R......", "R......", "Y......", "Y......",
        ]);
        assert!(board.check_win(Cell::Red));
        assert!(!board.check_win(Cell::Yellow));
    }

    #[test]
    fn test_diagonal_down_right_win() {
        let board = board_from([
            ".......", ".......", "Y......", "RY.....", "RRY....", "YRRY...",
        ]);
        assert_eq!(
            board.winning_line(Cell::Yellow),
            Some([(2, 0), (3, 1), (4, 2), (5, 3)])
        );
        assert!(!board.check_win(Cell::Red));
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new();
        // Create diagonal / pattern
        board.drop_piece(0, Cell::Red).unwrap();

        board.drop_piece(1, Cell::Yellow).unwrap();
        board.drop_piece(1, Cell::Red).unwrap();

        board.drop_piece(2, Cell::Yellow).unwrap();
        board.drop_piece(2, Cell::Yellow).unwrap();
        board.drop_piece(2, Cell::Red).unwrap();

        board.drop_piece(3, Cell::Yellow).unwrap();
        board.drop_piece(3, Cell::Yellow).unwrap();
        board.drop_piece(3, Cell::Yellow).unwrap();
        board.drop_piece(3, Cell::Red).unwrap();

        assert_eq!(
            board.winning_line(Cell::Red),
            Some([(5, 0), (4, 1), (3, 2), (2, 3)])
        );
    }

    #[test]
    fn test_anti_diagonal_in_top_right_corner() {
        let board = board_from([
            "......R", ".....R.", "....R..", "...R...", ".......", ".......",
        ]);
        assert_eq!(
            board.winning_line(Cell::Red),
            Some([(3, 3), (2, 4), (1, 5), (0, 6)])
        );
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, Cell::Red).unwrap();
        }
        assert!(!board.check_win(Cell::Red));
    }

    #[test]
    fn test_broken_lines_do_not_win() {
        let board = board_from([
            ".......", ".......", "R......", ".R.....", "..Y....", "RRYRR.R",
        ]);
        assert!(!board.check_win(Cell::Red));
        assert!(!board.check_win(Cell::Yellow));
    }

    #[test]
    fn test_cell_owner() {
        assert_eq!(Cell::Empty.owner(), None);
        assert_eq!(Cell::Red.owner(), Some(Player::Red));
        assert_eq!(Cell::Yellow.owner(), Some(Player::Yellow));
    }
}
