use ratatui::style::Color;

use crate::game::{Board, Player, Position, WIN_LENGTH};

/// End-of-game banner. Holds its own copy of the final board so the engine
/// can be reset while the banner is still on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    winner: Option<Player>,
    snapshot: Board,
    line: Option<[Position; WIN_LENGTH]>,
    frames_left: u32,
    total_frames: u32,
}

impl Banner {
    pub fn won(winner: Player, snapshot: Board, frames: u32) -> Self {
        Banner {
            winner: Some(winner),
            line: snapshot.winning_line(winner.to_cell()),
            snapshot,
            frames_left: frames,
            total_frames: frames.max(1),
        }
    }

    pub fn drawn(snapshot: Board, frames: u32) -> Self {
        Banner {
            winner: None,
            snapshot,
            line: None,
            frames_left: frames,
            total_frames: frames.max(1),
        }
    }

    pub fn text(&self) -> String {
        match self.winner {
            Some(player) => format!("{} won", player.name()),
            None => "It's a draw".to_string(),
        }
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn snapshot(&self) -> &Board {
        &self.snapshot
    }

    /// The winning four, for highlighting.
    pub fn line(&self) -> Option<[Position; WIN_LENGTH]> {
        self.line
    }

    /// Advance the fade by one frame. Returns `false` once fully faded.
    pub fn tick(&mut self) -> bool {
        self.frames_left = self.frames_left.saturating_sub(1);
        self.frames_left > 0
    }

    /// Remaining opacity in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        self.frames_left as f32 / self.total_frames as f32
    }

    /// Text color scaled by the remaining opacity.
    pub fn color(&self) -> Color {
        let (r, g, b) = match self.winner {
            Some(Player::Red) => (255, 0, 0),
            Some(Player::Yellow) => (255, 255, 0),
            None => (200, 200, 200),
        };
        let k = self.opacity();
        let scale = |c: u8| (c as f32 * k).round() as u8;
        Color::Rgb(scale(r), scale(g), scale(b))
    }
}
