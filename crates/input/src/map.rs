//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// The destructive full wipe is not mapped here; see
/// [`InputHandler`](crate::InputHandler) for the confirmed `X`, `y` sequence.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => {
            Some(GameAction::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => {
            Some(GameAction::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => {
            Some(GameAction::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => {
            Some(GameAction::Move(Direction::Down))
        }

        // History
        KeyCode::Char('u' | 'U') => Some(GameAction::Undo),
        KeyCode::Char('r' | 'R') => Some(GameAction::Redo),
        KeyCode::Char('p' | 'P') => Some(GameAction::Replay),

        KeyCode::Char('n' | 'N') => Some(GameAction::Reset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Key that asks for a full wipe (needs confirmation)
pub fn is_wipe_request(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('X')
        || (key.code == KeyCode::Char('x') && key.modifiers.contains(KeyModifiers::SHIFT))
}

pub fn is_confirm(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'))
}
