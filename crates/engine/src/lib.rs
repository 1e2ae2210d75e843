//! Engine module - a game session wired to storage and replay timing
//!
//! The [`Engine`] owns the only [`GameSession`](core::GameSession) of a run.
//! Front-ends send it [`GameAction`](types::GameAction)s and read
//! [`GameSnapshot`](core::GameSnapshot)s back; they never touch the grid
//! directly.
//!
//! # Lifecycle
//!
//! 1. [`Engine::open`] reads [`EngineConfig`] (see [`config`]), opens the
//!    store and restores the saved game; a missing or unusable record starts a
//!    new game with two seed tiles.
//! 2. Each committed move, undo, redo and reset is saved right away.
//! 3. When no move is left the saved record is removed; the best score stays.
//!
//! # Example
//!
//! ```
//! use tui_2048_engine::{Engine, EngineConfig};
//! use tui_2048_types::{Direction, GameAction};
//!
//! let config = EngineConfig {
//!     persist_disabled: true,
//!     seed: 7,
//!     ..EngineConfig::default()
//! };
//! let mut engine = Engine::open(&config);
//! for dir in Direction::ALL {
//!     engine.apply_action(GameAction::Move(dir));
//! }
//! assert!(engine.snapshot().score.best >= engine.snapshot().score.current);
//! ```

pub mod config;
pub mod engine;

pub use tui_2048_adapter as adapter;
pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use config::EngineConfig;
pub use engine::{DynStore, Engine, ReplayEnd};
