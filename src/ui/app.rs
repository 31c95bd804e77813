use crate::config::DisplayConfig;
use crate::game::{GameState, GameStatus, MoveError, COLS};
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::animation::FallingPieces;
use super::banner::Banner;
use super::board_widget::{BoardGeometry, FallState};
use super::game_view::{self, GameView};
use super::input::{Command, FrameInput, InputState, MoveCooldown};

/// The game loop: owns the engine and every presentation collaborator.
pub struct App {
    config: DisplayConfig,
    game_state: GameState,
    input: InputState,
    cooldown: MoveCooldown,
    falling: FallingPieces,
    banner: Option<Banner>,
    geometry: BoardGeometry,
    selected_column: usize,
    frame: u64,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: DisplayConfig) -> Self {
        App {
            config,
            game_state: GameState::initial(),
            input: InputState::new(),
            cooldown: MoveCooldown::new(),
            falling: FallingPieces::new(),
            banner: None,
            geometry: BoardGeometry::default(),
            selected_column: COLS / 2, // Start in middle
            frame: 0,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop, one update and one draw per frame at the
    /// configured rate.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        let frame_duration = Duration::from_secs_f64(1.0 / f64::from(self.config.frame_rate));
        let mut next_frame = Instant::now();
        info!(frame_rate = self.config.frame_rate, "game loop started");

        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            // Collect input until the frame deadline
            next_frame += frame_duration;
            while let Some(timeout) = next_frame.checked_duration_since(Instant::now()) {
                if !event::poll(timeout)? {
                    break;
                }
                let event = event::read()?;
                self.handle_event(&event);
            }

            // After a stall, resume from now instead of replaying missed frames
            let now = Instant::now();
            if now > next_frame + frame_duration {
                next_frame = now;
            }

            self.update();
        }

        info!(frames = self.frame, "game loop stopped");
        Ok(())
    }

    pub fn handle_event(&mut self, event: &Event) {
        self.input.handle_event(event);
    }

    /// Advance one frame.
    pub fn update(&mut self) {
        self.frame += 1;
        self.cooldown.tick();

        let input = self.input.take_frame();
        self.apply_input(input);

        if self.banner.as_mut().is_some_and(|banner| !banner.tick()) {
            self.banner = None;
        }
        self.falling.prune(self.frame, self.config.fall_speed);
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn apply_input(&mut self, input: FrameInput) {
        if let Some(column) = input
            .pointer
            .and_then(|(x, y)| self.geometry.column_at(x, y))
        {
            self.selected_column = column;
        }

        for command in input.commands {
            match command {
                Command::Quit => self.should_quit = true,
                Command::Restart => self.restart(),
                Command::CursorLeft => {
                    self.selected_column = self.selected_column.saturating_sub(1);
                }
                Command::CursorRight => {
                    self.selected_column = (self.selected_column + 1).min(COLS - 1);
                }
                Command::DropAtCursor => self.request_drop(self.selected_column),
            }
        }

        if let Some(column) = input
            .click
            .and_then(|(x, y)| self.geometry.column_at(x, y))
        {
            self.request_drop(column);
        }
    }

    /// Player intent to drop into `column`, subject to the cooldown.
    fn request_drop(&mut self, column: usize) {
        if !self.cooldown.is_ready() {
            return;
        }

        // The board was already cleared under the banner; this click only
        // dismisses it.
        if self.banner.is_some() && !self.game_state.is_terminal() {
            self.banner = None;
            self.falling.clear();
            self.cooldown.arm(self.config.move_cooldown_frames);
            return;
        }

        let player = self.game_state.current_player();
        match self.game_state.play(column) {
            Ok(row) => {
                info!(
                    player = player.name(),
                    column,
                    row,
                    turn = self.game_state.turn(),
                    "piece dropped"
                );
                self.falling.start((row, column), self.frame);
                self.cooldown.arm(self.config.move_cooldown_frames);
                self.message = None;
                self.finish_if_over();
            }
            Err(err) => {
                debug!(player = player.name(), column, %err, "move rejected");
                self.message = Some(
                    match err {
                        MoveError::ColumnFull => "Column is full!",
                        MoveError::InvalidColumn => "Invalid column!",
                        MoveError::GameOver => "Game over! Press 'r' to restart.",
                    }
                    .to_string(),
                );
            }
        }
    }

    /// Put up the banner for a finished game and, if configured, start the
    /// next one underneath it.
    fn finish_if_over(&mut self) {
        let board = *self.game_state.board();
        let banner = match self.game_state.status() {
            GameStatus::InProgress => return,
            GameStatus::Won(player) => {
                info!(winner = player.name(), turns = self.game_state.turn(), "game won");
                Banner::won(player, board, self.config.banner_frames)
            }
            GameStatus::Drawn => {
                info!(turns = self.game_state.turn(), "game drawn");
                Banner::drawn(board, self.config.banner_frames)
            }
        };
        self.banner = Some(banner);

        if self.config.auto_reset_on_win {
            self.game_state.reset();
            debug!("board reset for next game");
        }
    }

    fn restart(&mut self) {
        self.game_state.reset();
        self.banner = None;
        self.falling.clear();
        self.cooldown.clear();
        self.selected_column = COLS / 2;
        self.message = Some("New game started!".to_string());
        info!("game restarted");
    }

    fn view(&self) -> GameView<'_> {
        // The banner's snapshot stays on screen until it fades
        let (board, highlight) = match &self.banner {
            Some(banner) => (banner.snapshot(), banner.line()),
            None => (self.game_state.board(), None),
        };

        let ghost = if self.config.show_ghost
            && self.banner.is_none()
            && !self.game_state.is_terminal()
        {
            self.game_state
                .top_empty_row(self.selected_column)
                .map(|row| ((row, self.selected_column), self.game_state.current_player()))
        } else {
            None
        };

        // Until the banner is gone the header reports the finished game
        let status = match &self.banner {
            Some(banner) => match banner.winner() {
                Some(player) => GameStatus::Won(player),
                None => GameStatus::Drawn,
            },
            None => self.game_state.status(),
        };

        GameView {
            board,
            status,
            current_player: self.game_state.current_player(),
            cursor_column: self.selected_column,
            ghost,
            highlight,
            falling: FallState {
                pieces: &self.falling,
                now: self.frame,
                speed: self.config.fall_speed,
            },
            banner: self.banner.as_ref(),
            message: self.message.as_deref(),
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut ratatui::Frame) {
        let geometry = game_view::render(frame, &self.view());
        self.geometry = geometry;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DisplayConfig::default())
    }
}
