//! Core Connect Four game logic: board representation, player types, and the
//! game state machine. No rendering or input dependencies.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Position, COLS, ROWS, WIN_LENGTH};
pub use player::Player;
pub use state::{GameState, GameStatus, MoveError};
