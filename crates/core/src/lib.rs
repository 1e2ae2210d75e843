//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and history logic.
//! It has **no dependencies** on UI, storage, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games, and a recorded move log
//!   replays to the exact same grid and score
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: 4x4 grid of tile values with line queries
//! - [`rng`]: LCG and the tile spawner (2 or 4 on a random empty cell)
//! - [`resolver`]: slide, merge and re-slide for one direction
//! - [`scoring`]: current and best score
//! - [`history`]: undo/redo slots and the move log
//! - [`snapshot`]: undo entries and observer snapshots
//! - [`game_state`]: the session state machine (moves, undo/redo, reset, replay)
//!
//! # Game Rules
//!
//! - **Move**: every tile slides as far as it can towards the chosen edge
//! - **Merge**: two equal tiles that meet become one tile of double value; a tile
//!   merges at most once per move
//! - **Score**: each merge adds the new tile's value
//! - **Spawn**: after every move that changed something, a 2 or a 4 (even odds)
//!   appears on a random empty cell
//! - **Win**: a tile reaches 2048 (play may continue)
//! - **Game over**: the grid is full and no direction changes anything
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{GameSession, SessionConfig};
//! use tui_2048_types::Direction;
//!
//! let mut game = GameSession::new(12345, SessionConfig::default());
//! game.start();
//! assert_eq!(game.grid().tiles().len(), 2);
//!
//! for dir in Direction::ALL {
//!     let outcome = game.apply_move(dir);
//!     if outcome.moved {
//!         assert!(outcome.spawned.is_some());
//!     }
//! }
//! ```

pub mod game_state;
pub mod grid;
pub mod history;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameSession, RestoreError, SavedSession, SessionConfig};
pub use grid::{Grid, GridValues, LINE_LEN};
pub use history::History;
pub use resolver::{can_move, has_legal_move, resolve, resolve_line, LineResult, MoveResult};
pub use rng::{SimpleRng, Spawner};
pub use scoring::Score;
pub use snapshot::{GameSnapshot, Snapshot};
