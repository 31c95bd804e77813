//! Per-frame input collection: crossterm events are folded into a
//! [`FrameInput`] once per frame, and [`MoveCooldown`] debounces drops.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// Keyboard-level commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Restart,
    CursorLeft,
    CursorRight,
    DropAtCursor,
}

/// Everything the game loop needs from one frame of input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Last known pointer position (terminal column, row).
    pub pointer: Option<(u16, u16)>,
    /// Where the primary button went down this frame, if it did.
    pub click: Option<(u16, u16)>,
    pub commands: Vec<Command>,
}

/// Accumulates raw terminal events between frames.
#[derive(Debug, Default)]
pub struct InputState {
    pointer: Option<(u16, u16)>,
    click: Option<(u16, u16)>,
    commands: Vec<Command>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Mouse(mouse) => {
                let position = (mouse.column, mouse.row);
                match mouse.kind {
                    // Only the first press in a frame counts.
                    MouseEventKind::Down(MouseButton::Left) => {
                        self.pointer = Some(position);
                        self.click.get_or_insert(position);
                    }
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        self.pointer = Some(position);
                    }
                    _ => {}
                }
            }
            Event::Key(key) => {
                if let Some(command) = map_key(key) {
                    self.commands.push(command);
                }
            }
            _ => {}
        }
    }

    /// Hand over this frame's input. The press edge and commands are
    /// consumed; the pointer position persists.
    pub fn take_frame(&mut self) -> FrameInput {
        FrameInput {
            pointer: self.pointer,
            click: self.click.take(),
            commands: std::mem::take(&mut self.commands),
        }
    }
}

fn map_key(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Left => Some(Command::CursorLeft),
        KeyCode::Right => Some(Command::CursorRight),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::DropAtCursor),
        _ => None,
    }
}

/// Frame counter that blocks drops for a while after each successful move,
/// so one click never registers twice.
///
/// Armed with `n` on frame `f`, frames `f + 1 ..= f + n` are blocked and the
/// next drop is accepted on frame `f + n + 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveCooldown {
    frames_left: u32,
}

impl MoveCooldown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, frames: u32) {
        // The arming frame's own tick has already happened.
        self.frames_left = frames.saturating_add(1);
    }

    /// Advance one frame. Call at the start of every update.
    pub fn tick(&mut self) {
        self.frames_left = self.frames_left.saturating_sub(1);
    }

    pub fn is_ready(&self) -> bool {
        self.frames_left == 0
    }

    pub fn clear(&mut self) {
        self.frames_left = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_click_is_an_edge() {
        let mut input = InputState::new();
        input.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 2));

        let frame = input.take_frame();
        assert_eq!(frame.click, Some((4, 2)));
        assert_eq!(frame.pointer, Some((4, 2)));

        let next = input.take_frame();
        assert_eq!(next.click, None);
        assert_eq!(next.pointer, Some((4, 2)));
    }

    #[test]
    fn test_first_click_in_frame_wins() {
        let mut input = InputState::new();
        input.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        input.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 9, 1));
        assert_eq!(input.take_frame().click, Some((1, 1)));
    }

    #[test]
    fn test_other_buttons_and_release_are_not_clicks() {
        let mut input = InputState::new();
        input.handle_event(&mouse(MouseEventKind::Down(MouseButton::Right), 3, 3));
        input.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 3, 3));
        let frame = input.take_frame();
        assert_eq!(frame.click, None);
        assert_eq!(frame.pointer, None);
    }

    #[test]
    fn test_moves_update_pointer() {
        let mut input = InputState::new();
        input.handle_event(&mouse(MouseEventKind::Moved, 10, 5));
        input.handle_event(&mouse(MouseEventKind::Moved, 12, 6));
        assert_eq!(input.take_frame().pointer, Some((12, 6)));
    }

    #[test]
    fn test_keys_map_to_commands() {
        let mut input = InputState::new();
        for code in [
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Enter,
            KeyCode::Char('r'),
            KeyCode::Esc,
            KeyCode::Char('x'),
        ] {
            input.handle_event(&key(code));
        }
        assert_eq!(
            input.take_frame().commands,
            vec![
                Command::CursorLeft,
                Command::CursorRight,
                Command::DropAtCursor,
                Command::Restart,
                Command::Quit,
            ]
        );
        assert!(input.take_frame().commands.is_empty());
    }

    #[test]
    fn test_cooldown_blocks_for_armed_frames() {
        let mut cooldown = MoveCooldown::new();
        assert!(cooldown.is_ready());

        cooldown.arm(3);
        assert!(!cooldown.is_ready());
        for _ in 0..3 {
            cooldown.tick();
            assert!(!cooldown.is_ready());
        }
        cooldown.tick();
        assert!(cooldown.is_ready());
        cooldown.tick();
        assert!(cooldown.is_ready());
    }

    #[test]
    fn test_zero_cooldown_is_ready_next_frame() {
        let mut cooldown = MoveCooldown::new();
        cooldown.arm(0);
        assert!(!cooldown.is_ready());
        cooldown.tick();
        assert!(cooldown.is_ready());
    }

    #[test]
    fn test_cooldown_clear() {
        let mut cooldown = MoveCooldown::new();
        cooldown.arm(20);
        cooldown.clear();
        assert!(cooldown.is_ready());
    }
}
