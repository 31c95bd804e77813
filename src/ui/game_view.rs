use crate::game::{Board, GameStatus, Player, Position, WIN_LENGTH};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::banner::Banner;
use super::board_widget::{BoardGeometry, BoardWidget, FallState, Sprite};

/// Everything one frame of the game screen shows.
pub struct GameView<'a> {
    pub board: &'a Board,
    pub status: GameStatus,
    pub current_player: Player,
    pub cursor_column: usize,
    pub ghost: Option<(Position, Player)>,
    pub highlight: Option<[Position; WIN_LENGTH]>,
    pub falling: FallState<'a>,
    pub banner: Option<&'a Banner>,
    pub message: Option<&'a str>,
}

/// Draw the game screen and return where the board ended up, for mapping
/// pointer positions back to columns.
pub fn render(frame: &mut Frame, view: &GameView) -> BoardGeometry {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Board
            Constraint::Length(1), // Column indicator
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    let geometry = render_board(frame, view, chunks[1]);
    render_indicator(frame, &geometry, view.cursor_column, chunks[2]);
    render_message(frame, view.message, chunks[3]);
    render_controls(frame, chunks[4]);

    if let Some(banner) = view.banner {
        render_banner(frame, banner, geometry.area());
    }

    geometry
}

fn render_header(frame: &mut Frame, view: &GameView, area: Rect) {
    let (status, color) = match view.status {
        GameStatus::InProgress => (
            format!("Current Player: {}", view.current_player.name()),
            player_color(view.current_player),
        ),
        GameStatus::Won(player) => (
            format!("{} won  |  Press 'r' to play again", player.name()),
            player_color(player),
        ),
        GameStatus::Drawn => (
            "Draw  |  Press 'r' to play again".to_string(),
            Color::White,
        ),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, view: &GameView, area: Rect) -> BoardGeometry {
    let geometry = BoardGeometry::fit(area);
    if geometry.is_empty() {
        let warning = Paragraph::new("Terminal too small for the board")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(warning, area);
        return geometry;
    }

    let widget = BoardWidget::new(view.board)
        .ghost(view.ghost)
        .highlight(view.highlight)
        .falling(view.falling);
    frame.render_widget(widget, geometry.area());
    geometry
}

fn render_indicator(frame: &mut Frame, geometry: &BoardGeometry, cursor_column: usize, area: Rect) {
    if geometry.is_empty() {
        return;
    }
    let cell = geometry.cell_rect(0, cursor_column);
    let offset = cell.x.saturating_sub(area.x) + cell.width / 2;
    let line = Line::from(vec![
        Span::raw(" ".repeat(offset as usize)),
        Span::styled("▲", Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let text = message.unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("Click a column or ←/→ + Enter: Drop  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

/// Fading "<player> won" box centered over the board.
fn render_banner(frame: &mut Frame, banner: &Banner, board_area: Rect) {
    let text = banner.text();
    let width = (text.chars().count() as u16 + 6).min(board_area.width);
    let height = 3u16.min(board_area.height);
    if width == 0 || height == 0 {
        return;
    }
    let area = Rect::new(
        board_area.x + (board_area.width - width) / 2,
        board_area.y + (board_area.height - height) / 2,
        width,
        height,
    );
    let color = banner.color();

    let widget = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}

fn player_color(player: Player) -> Color {
    Sprite::for_player(player).color()
}
