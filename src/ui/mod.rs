//! Terminal UI: the frame-driven game loop, mouse/keyboard input, board
//! rendering, falling-piece animation and the end-of-game banner.

mod animation;
mod app;
mod banner;
pub mod board_widget;
mod game_view;
pub mod input;
pub mod terminal;

pub use animation::{FallingPiece, FallingPieces};
pub use app::App;
pub use banner::Banner;
pub use board_widget::{BoardGeometry, BoardWidget, Sprite};
