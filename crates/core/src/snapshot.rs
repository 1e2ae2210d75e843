use crate::grid::{Grid, GridValues, LINE_LEN};
use crate::scoring::Score;
use crate::types::{ControlStates, GameStatus};

/// Grid and score at one point in time (undo/redo entry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub grid: Grid,
    pub score: Score,
}

/// Everything an observer (renderer, score display, controls) needs after a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: GridValues,
    pub score: Score,
    pub status: GameStatus,
    pub controls: ControlStates,
    /// Sticky win flag (stays set while play continues past the win tile)
    pub won: bool,
    pub move_count: u32,
    /// `(applied, total)` while replaying
    pub replay_progress: Option<(u32, u32)>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[0; LINE_LEN]; LINE_LEN];
        self.score = Score::default();
        self.status = GameStatus::Playing;
        self.controls = ControlStates {
            reset: true,
            ..ControlStates::default()
        };
        self.won = false;
        self.move_count = 0;
        self.replay_progress = None;
    }

    /// Accepts move input
    pub fn playable(&self) -> bool {
        matches!(self.status, GameStatus::Playing | GameStatus::Won)
    }

    /// Occupied cells as `(row, col, value)`
    pub fn occupied(&self) -> impl Iterator<Item = (u8, u8, u32)> + '_ {
        self.grid.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .map(move |(col, &v)| (row as u8, col as u8, v))
        })
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: [[0; LINE_LEN]; LINE_LEN],
            score: Score::default(),
            status: GameStatus::Playing,
            controls: ControlStates::default(),
            won: false,
            move_count: 0,
            replay_progress: None,
        };
        s.clear();
        s
    }
}
