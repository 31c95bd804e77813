use crate::game::Position;

/// A piece on its way down, keyed by landing cell and placement frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingPiece {
    pub row: usize,
    pub col: usize,
    pub placed_at: u64,
}

impl FallingPiece {
    /// Vertical position in board rows at frame `now`. Starts one row above
    /// the board and stops at the landing row.
    pub fn position(&self, now: u64, speed: f32) -> f32 {
        let elapsed = now.saturating_sub(self.placed_at) as f32;
        (-1.0 + elapsed * speed).min(self.row as f32)
    }

    pub fn has_landed(&self, now: u64, speed: f32) -> bool {
        self.position(now, speed) >= self.row as f32
    }
}

/// In-flight pieces. Lives outside the engine: the board already holds the
/// landed piece, this only decides where it is drawn.
#[derive(Debug, Clone, Default)]
pub struct FallingPieces {
    pieces: Vec<FallingPiece>,
}

impl FallingPieces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, (row, col): Position, now: u64) {
        self.pieces.retain(|p| (p.row, p.col) != (row, col));
        self.pieces.push(FallingPiece {
            row,
            col,
            placed_at: now,
        });
    }

    /// Current drawing row for the piece at `(row, col)`, or `None` once it
    /// has landed (or was never animated).
    pub fn position_of(&self, (row, col): Position, now: u64, speed: f32) -> Option<f32> {
        self.pieces
            .iter()
            .find(|p| p.row == row && p.col == col)
            .filter(|p| !p.has_landed(now, speed))
            .map(|p| p.position(now, speed))
    }

    /// Drop pieces that have landed.
    pub fn prune(&mut self, now: u64, speed: f32) {
        self.pieces.retain(|p| !p.has_landed(now, speed));
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_falls_from_above_the_board() {
        let piece = FallingPiece {
            row: 5,
            col: 0,
            placed_at: 10,
        };
        assert_eq!(piece.position(10, 0.5), -1.0);
        assert_eq!(piece.position(12, 0.5), 0.0);
        assert!(!piece.has_landed(21, 0.5));
        assert_eq!(piece.position(22, 0.5), 5.0);
        assert!(piece.has_landed(22, 0.5));
        assert_eq!(piece.position(100, 0.5), 5.0);
    }

    #[test]
    fn test_position_of_landed_piece_is_none() {
        let mut falling = FallingPieces::new();
        falling.start((0, 3), 0);
        assert_eq!(falling.position_of((0, 3), 0, 0.25), Some(-1.0));
        assert_eq!(falling.position_of((0, 3), 4, 0.25), None);
        assert_eq!(falling.position_of((1, 3), 0, 0.25), None);
    }

    #[test]
    fn test_prune_removes_landed_pieces() {
        let mut falling = FallingPieces::new();
        falling.start((5, 0), 0);
        falling.start((0, 1), 0);
        falling.prune(2, 1.0);
        assert_eq!(falling.position_of((5, 0), 2, 1.0), Some(1.0));
        falling.prune(6, 1.0);
        assert!(falling.is_empty());
    }

    #[test]
    fn test_restart_in_same_cell_replaces_old_entry() {
        let mut falling = FallingPieces::new();
        falling.start((5, 2), 0);
        falling.start((5, 2), 50);
        assert_eq!(falling.position_of((5, 2), 50, 1.0), Some(-1.0));
        falling.clear();
        assert!(falling.is_empty());
    }
}
