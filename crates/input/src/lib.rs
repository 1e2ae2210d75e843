//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. It knows
//! nothing about the game state beyond the pending full-wipe confirmation.
//!
//! | Keys                      | Action              |
//! |---------------------------|---------------------|
//! | arrows, `hjkl`, `wasd`    | move                |
//! | `u` / `r`                 | undo / redo         |
//! | `p`                       | replay              |
//! | `n`                       | new game            |
//! | `X` then `y`              | new game, clear best|
//! | `q`, Ctrl-C               | quit                |

pub mod handler;
pub mod map;

pub use tui_2048_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, is_confirm, is_wipe_request, should_quit};
