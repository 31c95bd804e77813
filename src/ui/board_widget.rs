use crate::game::{Board, Cell, Player, Position, COLS, ROWS, WIN_LENGTH};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use super::animation::FallingPieces;

const BOARD_COLOR: Color = Color::Blue;
const HOLE_COLOR: Color = Color::Black;
const HIGHLIGHT_COLOR: Color = Color::White;

/// Screen layout of the board: a grid of `COLS x ROWS` equal cells whose
/// size is the area divided by the grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardGeometry {
    pub origin_x: u16,
    pub origin_y: u16,
    pub cell_width: u16,
    pub cell_height: u16,
}

impl BoardGeometry {
    pub fn new(area: Rect) -> Self {
        BoardGeometry {
            origin_x: area.x,
            origin_y: area.y,
            cell_width: area.width / COLS as u16,
            cell_height: area.height / ROWS as u16,
        }
    }

    /// Largest board with roughly square cells (terminal cells are about
    /// twice as tall as wide) centered inside `available`.
    pub fn fit(available: Rect) -> Self {
        let cell_height = (available.height / ROWS as u16).min(available.width / (COLS as u16 * 2));
        let cell_width = cell_height * 2;
        let width = cell_width * COLS as u16;
        let height = cell_height * ROWS as u16;
        BoardGeometry {
            origin_x: available.x + (available.width - width) / 2,
            origin_y: available.y + (available.height - height) / 2,
            cell_width,
            cell_height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cell_width == 0 || self.cell_height == 0
    }

    pub fn area(&self) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            self.cell_width * COLS as u16,
            self.cell_height * ROWS as u16,
        )
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.origin_x + col as u16 * self.cell_width,
            self.origin_y + row as u16 * self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }

    /// Column under a pointer position, by integer division of the x offset
    /// by the cell width. `None` outside the board.
    pub fn column_at(&self, x: u16, y: u16) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let area = self.area();
        let inside = x >= area.x && x < area.right() && y >= area.y && y < area.bottom();
        inside.then(|| ((x - area.x) / self.cell_width) as usize)
    }
}

/// Which sprite a cell shows; `None` for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    RedPiece,
    YellowPiece,
}

impl Sprite {
    pub fn for_cell(cell: Cell) -> Option<Sprite> {
        cell.owner().map(Sprite::for_player)
    }

    pub fn for_player(player: Player) -> Sprite {
        match player {
            Player::Red => Sprite::RedPiece,
            Player::Yellow => Sprite::YellowPiece,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Sprite::RedPiece => Color::Red,
            Sprite::YellowPiece => Color::Yellow,
        }
    }
}

/// Falling-animation inputs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FallState<'a> {
    pub pieces: &'a FallingPieces,
    pub now: u64,
    pub speed: f32,
}

/// Draws the board, pieces, an optional ghost piece and an optional
/// highlighted winning line.
pub struct BoardWidget<'a> {
    board: &'a Board,
    ghost: Option<(Position, Player)>,
    highlight: Option<[Position; WIN_LENGTH]>,
    falling: Option<FallState<'a>>,
}

impl<'a> BoardWidget<'a> {
    pub fn new(board: &'a Board) -> Self {
        BoardWidget {
            board,
            ghost: None,
            highlight: None,
            falling: None,
        }
    }

    pub fn ghost(mut self, ghost: Option<(Position, Player)>) -> Self {
        self.ghost = ghost;
        self
    }

    pub fn highlight(mut self, line: Option<[Position; WIN_LENGTH]>) -> Self {
        self.highlight = line;
        self
    }

    pub fn falling(mut self, falling: FallState<'a>) -> Self {
        self.falling = Some(falling);
        self
    }

    fn is_highlighted(&self, pos: Position) -> bool {
        self.highlight.is_some_and(|line| line.contains(&pos))
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geometry = BoardGeometry::new(area);
        if geometry.is_empty() {
            return;
        }
        let board_area = geometry.area();
        buf.set_style(board_area, Style::default().bg(BOARD_COLOR));

        for row in 0..ROWS {
            for col in 0..COLS {
                let rect = geometry.cell_rect(row, col);
                if self.is_highlighted((row, col)) {
                    buf.set_style(rect, Style::default().bg(HIGHLIGHT_COLOR));
                }
                fill_interior(buf, board_area, rect, rect.y as i32, " ", Style::default().bg(HOLE_COLOR));
            }
        }

        if let Some(((row, col), player)) = self.ghost {
            let rect = geometry.cell_rect(row, col);
            let style = Style::default().fg(Sprite::for_player(player).color());
            fill_interior(buf, board_area, rect, rect.y as i32, "░", style);
        }

        for row in 0..ROWS {
            for col in 0..COLS {
                let Some(sprite) = Sprite::for_cell(self.board.get(row, col)) else {
                    continue;
                };
                let rect = geometry.cell_rect(row, col);
                let top = match self
                    .falling
                    .and_then(|f| f.pieces.position_of((row, col), f.now, f.speed))
                {
                    Some(position) => {
                        board_area.y as i32
                            + (position * geometry.cell_height as f32).round() as i32
                    }
                    None => rect.y as i32,
                };
                let mut style = Style::default().fg(sprite.color());
                if self.is_highlighted((row, col)) {
                    style = style.add_modifier(Modifier::BOLD);
                }
                fill_interior(buf, board_area, rect, top, "█", style);
            }
        }
    }
}

/// Fill the inside of a cell (leaving a frame margin when the cell is large
/// enough) with `symbol`, drawn with its top edge at `top` and clipped to
/// `clip`.
fn fill_interior(buf: &mut Buffer, clip: Rect, cell: Rect, top: i32, symbol: &str, style: Style) {
    let margin_x = if cell.width >= 4 { 1 } else { 0 };
    let margin_y = if cell.height >= 3 { 1 } else { 0 };
    let width = cell.width - 2 * margin_x;
    let height = cell.height - 2 * margin_y;
    let line = symbol.repeat(width as usize);

    for dy in 0..height as i32 {
        let y = top + margin_y as i32 + dy;
        if y < clip.y as i32 || y >= clip.bottom() as i32 {
            continue;
        }
        buf.set_string(cell.x + margin_x, y as u16, &line, style);
    }
}
