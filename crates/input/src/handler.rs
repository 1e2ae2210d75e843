//! Stateful key handling.
//!
//! Terminals deliver auto-repeat as extra presses; moves fire once per press
//! event and repeats are dropped. The full wipe needs two keys: `X` arms it and
//! `y` confirms. Any other key disarms it and is otherwise handled normally.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, is_confirm, is_wipe_request};
use crate::types::GameAction;

#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    wipe_armed: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while waiting for the full wipe confirmation
    pub fn awaiting_confirmation(&self) -> bool {
        self.wipe_armed
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<GameAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if self.wipe_armed {
            self.wipe_armed = false;
            if is_confirm(key) {
                return Some(GameAction::ResetAll);
            }
            // `n` declines the prompt rather than starting a normal reset.
            if matches!(handle_key_event(key), Some(GameAction::Reset)) {
                return None;
            }
        }

        if is_wipe_request(key) {
            self.wipe_armed = true;
            return None;
        }

        handle_key_event(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_plain_keys_pass_through() {
        let mut h = InputHandler::new();
        assert_eq!(
            h.handle_key(press(KeyCode::Left)),
            Some(GameAction::Move(Direction::Left))
        );
        assert_eq!(h.handle_key(press(KeyCode::Char('u'))), Some(GameAction::Undo));
    }

    #[test]
    fn test_wipe_needs_confirmation() {
        let mut h = InputHandler::new();
        assert_eq!(h.handle_key(press(KeyCode::Char('X'))), None);
        assert!(h.awaiting_confirmation());
        assert_eq!(
            h.handle_key(press(KeyCode::Char('y'))),
            Some(GameAction::ResetAll)
        );
        assert!(!h.awaiting_confirmation());
        assert_eq!(h.handle_key(press(KeyCode::Char('y'))), None);
    }

    #[test]
    fn test_declined_wipe() {
        let mut h = InputHandler::new();
        h.handle_key(press(KeyCode::Char('X')));
        // `n` answers the prompt and must not start a normal reset
        assert_eq!(h.handle_key(press(KeyCode::Char('n'))), None);
        assert!(!h.awaiting_confirmation());

        h.handle_key(press(KeyCode::Char('X')));
        assert_eq!(
            h.handle_key(press(KeyCode::Down)),
            Some(GameAction::Move(Direction::Down))
        );
        assert!(!h.awaiting_confirmation());
    }

    #[test]
    fn test_repeat_and_release_ignored() {
        let mut h = InputHandler::new();
        let repeat = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::NONE,
        };
        let release = KeyEvent {
            kind: KeyEventKind::Release,
            ..repeat
        };
        assert_eq!(h.handle_key(repeat), None);
        assert_eq!(h.handle_key(release), None);
    }
}
