use super::board::{Board, COLS};
use super::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    /// Board filled with no four-in-a-row.
    Drawn,
}

/// Why a drop was rejected. Rejections never change the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("invalid column")]
    InvalidColumn,
    #[error("game is over")]
    GameOver,
}

/// The board engine: grid, turn counter and win state.
///
/// `Won` and `Drawn` are terminal until [`GameState::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: u32,
    status: GameStatus,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            turn: 0, // Red starts
            status: GameStatus::InProgress,
        }
    }

    /// Player whose turn it is, from turn parity.
    pub fn current_player(&self) -> Player {
        Player::for_turn(self.turn)
    }

    /// Number of successful placements since the last reset.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Row a piece dropped into `col` would land in, `None` if full.
    pub fn top_empty_row(&self, col: usize) -> Option<usize> {
        self.board.top_empty_row(col)
    }

    /// Drop `player`'s piece into `col`, returning the landing row.
    ///
    /// On success the turn advances and only `player`'s mark is checked for
    /// a win. Rejected drops leave grid, turn and status untouched.
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = self.board.drop_piece(col, player.to_cell())?;
        self.turn += 1;

        if self.check_win(player) {
            self.status = GameStatus::Won(player);
        } else if self.board.is_full() {
            self.status = GameStatus::Drawn;
        }

        Ok(row)
    }

    /// Drop a piece for the player whose turn it is.
    pub fn play(&mut self, col: usize) -> Result<usize, MoveError> {
        self.drop_piece(col, self.current_player())
    }

    /// Whether `player` has four in a row anywhere on the board.
    pub fn check_win(&self, player: Player) -> bool {
        self.board.check_win(player.to_cell())
    }

    /// Clear the board and hand the move back to Red.
    pub fn reset(&mut self) {
        *self = GameState::initial();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
