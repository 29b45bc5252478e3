use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::game::{Direction, GameConfig, SwipeVector};

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// A finished swipe, in pixels
    Swipe(SwipeVector),
    /// Leave the home screen for the game
    Start,
    Restart,
    /// Return to the home screen
    Back,
    Quit,
    None,
}

pub struct InputHandler {
    cell_width_px: f32,
    cell_height_px: f32,
    key_swipe_px: f32,
    /// Cell where the left button went down, while a drag is in progress
    drag_origin: Option<(u16, u16)>,
}

impl InputHandler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            cell_width_px: config.cell_width_px,
            cell_height_px: config.cell_height_px,
            key_swipe_px: config.key_swipe_px,
            drag_origin: None,
        }
    }

    fn key_swipe(&self, direction: Direction) -> InputAction {
        InputAction::Swipe(SwipeVector::toward(direction, self.key_swipe_px))
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => self.key_swipe(Direction::Up),
            KeyCode::Down => self.key_swipe(Direction::Down),
            KeyCode::Left => self.key_swipe(Direction::Left),
            KeyCode::Right => self.key_swipe(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => self.key_swipe(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => self.key_swipe(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => self.key_swipe(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => self.key_swipe(Direction::Right),

            // Controls
            KeyCode::Enter | KeyCode::Char(' ') => InputAction::Start,
            KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Restart,
            KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Backspace => InputAction::Back,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,

            _ => InputAction::None,
        }
    }

    /// Track left-button drags. The release produces one swipe per press;
    /// a release without a press is ignored.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> InputAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_origin = Some((mouse.column, mouse.row));
                InputAction::None
            }
            MouseEventKind::Up(MouseButton::Left) => match self.drag_origin.take() {
                Some((column, row)) => {
                    let dx = (f32::from(mouse.column) - f32::from(column)) * self.cell_width_px;
                    let dy = (f32::from(mouse.row) - f32::from(row)) * self.cell_height_px;
                    InputAction::Swipe(SwipeVector::new(dx, dy))
                }
                None => InputAction::None,
            },
            _ => InputAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn swipe_direction(action: InputAction, threshold: f32) -> Option<Direction> {
        match action {
            InputAction::Swipe(swipe) => swipe.classify(threshold),
            _ => None,
        }
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::default();

        for (code, direction) in [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ] {
            let action = handler.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
            // Key swipes clear the tutorial threshold as well as the steering one.
            assert_eq!(swipe_direction(action, 30.0), Some(direction));
        }
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::default();

        let w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(w),
            InputAction::Swipe(SwipeVector::new(0.0, -48.0))
        );

        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            swipe_direction(handler.handle_key_event(d_upper), 20.0),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_navigation_keys() {
        let handler = InputHandler::default();

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(enter), InputAction::Start);

        let r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(r), InputAction::Restart);

        let backspace = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(backspace), InputAction::Back);
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::default();

        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(q), InputAction::Quit);

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(esc), InputAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), InputAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::default();

        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(x), InputAction::None);
    }

    #[test]
    fn test_drag_becomes_swipe() {
        let mut handler = InputHandler::default();

        let down = mouse(MouseEventKind::Down(MouseButton::Left), 10, 10);
        assert_eq!(handler.handle_mouse_event(down), InputAction::None);

        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 12, 10);
        assert_eq!(handler.handle_mouse_event(drag), InputAction::None);

        // 3 cells left at 8 px per cell, 1 row down at 16 px per row.
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 7, 11);
        assert_eq!(
            handler.handle_mouse_event(up),
            InputAction::Swipe(SwipeVector::new(-24.0, 16.0))
        );
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut handler = InputHandler::default();

        let up = mouse(MouseEventKind::Up(MouseButton::Left), 7, 11);
        assert_eq!(handler.handle_mouse_event(up), InputAction::None);

        handler.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert!(matches!(handler.handle_mouse_event(up), InputAction::Swipe(_)));
        // The press was consumed by the first release.
        assert_eq!(handler.handle_mouse_event(up), InputAction::None);
    }

    #[test]
    fn test_other_buttons_are_ignored() {
        let mut handler = InputHandler::default();

        let right_down = mouse(MouseEventKind::Down(MouseButton::Right), 0, 0);
        let right_up = mouse(MouseEventKind::Up(MouseButton::Right), 20, 0);
        assert_eq!(handler.handle_mouse_event(right_down), InputAction::None);
        assert_eq!(handler.handle_mouse_event(right_up), InputAction::None);
    }
}
