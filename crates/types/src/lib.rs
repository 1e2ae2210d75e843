//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, persistence, terminal rendering).
//!
//! # Grid Dimensions
//!
//! The playfield is a square grid:
//!
//! - **Size**: 4x4 cells (rows and columns indexed 0-3)
//! - **Coordinates**: `(row, col)`, row 0 is the top, col 0 is the left
//! - **Values**: `0` is an empty cell, otherwise a power of two >= 2
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_SIZE` | 4 | Cells per row and per column |
//! | `WIN_VALUE` | 2048 | Tile value that wins the game |
//! | `SEED_TILE_COUNT` | 2 | Tiles placed when a game starts |
//! | `FOUR_TILE_PERCENT` | 50 | Chance that a spawned tile is a 4 |
//! | `DEFAULT_UNDO_DEPTH` | 1 | Moves that can be undone |
//! | `REPLAY_INTERVAL_MS` | 250 | Pause between replayed moves |
//! | `TICK_MS` | 16 | Fixed timestep of the terminal loop |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, Position, GRID_SIZE};
//!
//! // Parse a direction (case-insensitive)
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir, Direction::Left);
//!
//! // Directions round-trip through the persisted key codes
//! assert_eq!(Direction::from_key_code(dir.key_code()), Some(dir));
//!
//! // Parse a game action
//! let action = GameAction::from_str("undo").unwrap();
//! assert_eq!(action, GameAction::Undo);
//!
//! let corner = Position::new(GRID_SIZE - 1, GRID_SIZE - 1);
//! assert_eq!(corner.index(), 15);
//! ```

/// Cells per row and per column (4x4 grid)
pub const GRID_SIZE: u8 = 4;

/// Total number of cells on the grid
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Default win threshold
pub const WIN_VALUE: u32 = 2048;

/// Number of tiles placed on a fresh grid
pub const SEED_TILE_COUNT: usize = 2;

/// Probability (percent) that a spawned tile is a 4 rather than a 2.
///
/// This game splits evenly between 2 and 4.
pub const FOUR_TILE_PERCENT: u32 = 50;

/// Undo history depth (single-level by default)
pub const DEFAULT_UNDO_DEPTH: usize = 1;

/// Pause between replayed moves in milliseconds
pub const REPLAY_INTERVAL_MS: u32 = 250;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_defaults() {
        assert_eq!(GRID_SIZE, 4);
        assert_eq!(CELL_COUNT, 16);
        assert_eq!(WIN_VALUE, 2048);
        assert_eq!(SEED_TILE_COUNT, 2);
        assert_eq!(FOUR_TILE_PERCENT, 50);
        assert_eq!(DEFAULT_UNDO_DEPTH, 1);
    }

    #[test]
    fn direction_axes() {
        assert_eq!(Direction::Left.axis(), Axis::Row);
        assert_eq!(Direction::Right.axis(), Axis::Row);
        assert_eq!(Direction::Up.axis(), Axis::Column);
        assert_eq!(Direction::Down.axis(), Axis::Column);
    }

    #[test]
    fn direction_key_codes() {
        assert_eq!(Direction::Left.key_code(), 37);
        assert_eq!(Direction::Up.key_code(), 38);
        assert_eq!(Direction::Right.key_code(), 39);
        assert_eq!(Direction::Down.key_code(), 40);
        assert_eq!(Direction::from_key_code(41), None);
        assert_eq!(Direction::from_key_code(0), None);
    }

    #[test]
    fn tile_value_rules() {
        assert!(is_tile_value(0));
        assert!(is_tile_value(2));
        assert!(is_tile_value(4096));
        assert!(!is_tile_value(1));
        assert!(!is_tile_value(3));
        assert!(!is_tile_value(6));
    }

    #[test]
    fn action_round_trip() {
        for action in [
            GameAction::Move(Direction::Up),
            GameAction::Move(Direction::Down),
            GameAction::Move(Direction::Left),
            GameAction::Move(Direction::Right),
            GameAction::Undo,
            GameAction::Redo,
            GameAction::Replay,
            GameAction::Reset,
            GameAction::ResetAll,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}

/// A cell coordinate on the grid
///
/// `row` grows downwards, `col` grows to the right. Both are in `[0, GRID_SIZE)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check that the position lies on the grid
    pub fn in_bounds(&self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// Flat row-major index (`row * GRID_SIZE + col`)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Position;
    ///
    /// assert_eq!(Position::new(0, 0).index(), 0);
    /// assert_eq!(Position::new(1, 2).index(), 6);
    /// ```
    pub fn index(&self) -> usize {
        (self.row as usize) * (GRID_SIZE as usize) + (self.col as usize)
    }

    /// Inverse of [`Position::index`]
    pub fn from_index(index: usize) -> Self {
        Self {
            row: (index / GRID_SIZE as usize) as u8,
            col: (index % GRID_SIZE as usize) as u8,
        }
    }
}

/// A tile value at a position
///
/// `value == 0` means "no tile". Occupied cells hold a power of two >= 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub position: Position,
    pub value: u32,
}

impl Tile {
    pub const fn new(position: Position, value: u32) -> Self {
        Self { position, value }
    }
}

/// Check whether `value` may be stored in a cell (0 or a power of two >= 2)
pub fn is_tile_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// Which kind of line a direction moves along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/Right moves slide tiles along rows
    Row,
    /// Up/Down moves slide tiles along columns
    Column,
}

/// The four move directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order the game-over check tries them
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn axis(&self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Row,
            Direction::Up | Direction::Down => Axis::Column,
        }
    }

    /// True when tiles travel towards the high index of their line
    /// (right for rows, down for columns).
    pub fn towards_high_index(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    /// Keyboard code stored in saved games (37 = left, 38 = up, 39 = right, 40 = down)
    pub fn key_code(&self) -> u32 {
        match self {
            Direction::Left => 37,
            Direction::Up => 38,
            Direction::Right => 39,
            Direction::Down => 40,
        }
    }

    /// Inverse of [`Direction::key_code`]
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Direction::Left),
            38 => Some(Direction::Up),
            39 => Some(Direction::Right),
            40 => Some(Direction::Down),
            _ => None,
        }
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "up" | "u", "down" | "d",
    /// "left" | "l", "right" | "r".
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("r"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// One committed move, enough to replay it deterministically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub direction: Direction,
    /// Tile the spawner placed after the move (None when the grid was full)
    pub spawned: Option<Tile>,
}

/// Actions that can be applied to a game session
///
/// Used by terminal input and by the engine facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift all tiles in a direction
    Move(Direction),
    /// Restore the state before the last move
    Undo,
    /// Re-apply the last undone move
    Redo,
    /// Replay the recorded game from its seed tiles
    Replay,
    /// Start a new game, keeping the best score
    Reset,
    /// Start a new game and clear the best score (destructive)
    ResetAll,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::Move(Direction::Left)));
    /// assert_eq!(GameAction::from_str("redo"), Some(GameAction::Redo));
    /// assert_eq!(GameAction::from_str("resetAll"), Some(GameAction::ResetAll));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(GameAction::Move(Direction::Up)),
            "movedown" => Some(GameAction::Move(Direction::Down)),
            "moveleft" => Some(GameAction::Move(Direction::Left)),
            "moveright" => Some(GameAction::Move(Direction::Right)),
            "undo" => Some(GameAction::Undo),
            "redo" => Some(GameAction::Redo),
            "replay" => Some(GameAction::Replay),
            "reset" => Some(GameAction::Reset),
            "resetall" => Some(GameAction::ResetAll),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(Direction::Up) => "moveUp",
            GameAction::Move(Direction::Down) => "moveDown",
            GameAction::Move(Direction::Left) => "moveLeft",
            GameAction::Move(Direction::Right) => "moveRight",
            GameAction::Undo => "undo",
            GameAction::Redo => "redo",
            GameAction::Replay => "replay",
            GameAction::Reset => "reset",
            GameAction::ResetAll => "resetAll",
        }
    }
}

/// Lifecycle state of a session as seen by observers
///
/// - **Playing**: moves are accepted
/// - **Won**: the win tile exists; play may continue
/// - **GameOver**: the grid is full and no direction moves anything
/// - **Replaying**: the move log is being re-applied; move input is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Won,
    GameOver,
    Replaying,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::GameOver => "gameOver",
            GameStatus::Replaying => "replaying",
        }
    }
}

/// Which controls are currently usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ControlStates {
    pub undo: bool,
    pub redo: bool,
    pub replay: bool,
    pub reset: bool,
}

/// Result of applying a move to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// False when the direction changed nothing (no side effects happened)
    pub moved: bool,
    /// Sum of the merged tile values produced by this move
    pub score_delta: u32,
    pub is_won: bool,
    pub is_game_over: bool,
    /// Tile placed after the move, if any
    pub spawned: Option<Tile>,
}
