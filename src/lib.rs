//! # Connect Four
//!
//! Two-player Connect Four in the terminal. Pieces are dropped by clicking a
//! column (or with the arrow keys), fall under gravity, and the first player
//! to line up four wins.
//!
//! ## Modules
//!
//! - [`game`] - Core game logic: board, player, state machine
//! - [`ui`] - Terminal UI: game loop, input, rendering, animation
//! - [`config`] - TOML configuration loading and validation
//! - [`logging`] - File-backed tracing subscriber
//! - [`error`] - Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
