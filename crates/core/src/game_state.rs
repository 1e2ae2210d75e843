//! Game state module - the session state machine
//!
//! This module ties together the grid, spawner, resolver, score and history.
//! A [`GameSession`] is only changed through its move/undo/redo/reset/replay
//! methods; observers read [`GameSnapshot`]s.
//!
//! # Turn order
//!
//! `apply_move` resolves the direction; when nothing moves the call is a no-op.
//! Otherwise the pre-move state goes to history, the resolved grid and score are
//! committed, one tile is spawned and recorded with the move, and the win and
//! game-over flags are updated.
//!
//! # Replay
//!
//! Replay rebuilds the game from the recorded seed tiles, one recorded move per
//! [`GameSession::replay_step`], placing the recorded spawn instead of drawing a
//! new one. Cancelling puts back the state replay started from.

use derive_more::{Display, Error};

use crate::grid::Grid;
use crate::history::History;
use crate::resolver::{has_legal_move, resolve};
use crate::rng::Spawner;
use crate::scoring::Score;
use crate::snapshot::{GameSnapshot, Snapshot};
use crate::types::*;

/// Tunables for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub win_value: u32,
    pub undo_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            win_value: WIN_VALUE,
            undo_depth: DEFAULT_UNDO_DEPTH,
        }
    }
}

/// Session data that lives in storage
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedSession {
    pub grid: Grid,
    pub score: Score,
    pub moves: Vec<MoveRecord>,
    pub seed_tiles: Vec<Tile>,
}

/// Why a saved session could not be rebuilt
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RestoreError {
    #[display("seed tiles are invalid")]
    SeedTiles,
    #[display("move {index} does not change the grid")]
    NoOpMove { index: usize },
    #[display("move {index} has a missing, occupied or invalid spawned tile")]
    SpawnedTile { index: usize },
    #[display("replaying the move log does not reproduce the saved grid")]
    GridMismatch,
    #[display("replaying the move log does not reproduce the saved score")]
    ScoreMismatch,
}

#[derive(Debug, Clone, Copy)]
struct ReplayState {
    /// Next move log index to apply
    cursor: usize,
    resume: Snapshot,
    resume_won: bool,
    resume_over: bool,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    score: Score,
    history: History,
    spawner: Spawner,
    config: SessionConfig,
    won: bool,
    over: bool,
    started: bool,
    replay: Option<ReplayState>,
}

impl GameSession {
    /// Create a session with an empty grid and the given spawner seed
    pub fn new(seed: u32, config: SessionConfig) -> Self {
        Self {
            grid: Grid::new(),
            score: Score::default(),
            history: History::new(config.undo_depth),
            spawner: Spawner::new(seed),
            config,
            won: false,
            over: false,
            started: false,
            replay: None,
        }
    }

    /// Carry a best score over from an earlier session
    pub fn with_best(mut self, best: u32) -> Self {
        self.score.best = self.score.best.max(best);
        self
    }

    /// Place the seed tiles (once)
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.seed_grid();
    }

    fn seed_grid(&mut self) {
        self.grid.clear();
        let mut seeds = [Tile::new(Position::new(0, 0), 0); SEED_TILE_COUNT];
        let mut placed = 0;
        for slot in seeds.iter_mut() {
            if let Some(tile) = self.spawner.spawn(&mut self.grid) {
                *slot = tile;
                placed += 1;
            }
        }
        self.history.reset(&seeds[..placed]);
    }

    /// Rebuild a session from storage.
    ///
    /// Exactly two seed tiles of value 2 or 4 are required, and every recorded
    /// move must carry its spawned tile. The move log is re-simulated from the
    /// seed tiles and must reproduce the saved grid and score exactly.
    pub fn restore(
        saved: SavedSession,
        seed: u32,
        config: SessionConfig,
    ) -> Result<Self, RestoreError> {
        if saved.seed_tiles.len() != SEED_TILE_COUNT
            || saved.seed_tiles.iter().any(|t| t.value != 2 && t.value != 4)
        {
            return Err(RestoreError::SeedTiles);
        }
        let mut grid = Grid::try_from_tiles(&saved.seed_tiles).ok_or(RestoreError::SeedTiles)?;
        let mut score = 0u32;

        for (index, record) in saved.moves.iter().enumerate() {
            let (next, result) = resolve(&grid, record.direction, config.win_value);
            if !result.moved {
                return Err(RestoreError::NoOpMove { index });
            }
            grid = next;
            score = score.saturating_add(result.score_delta);
            // A committed move always leaves a free cell, so every record spawns.
            let tile = record.spawned.ok_or(RestoreError::SpawnedTile { index })?;
            let valid = tile.position.in_bounds()
                && (tile.value == 2 || tile.value == 4)
                && grid.is_empty_at(tile.position);
            if !valid {
                return Err(RestoreError::SpawnedTile { index });
            }
            grid.set(tile.position, tile.value);
        }

        if grid != saved.grid {
            return Err(RestoreError::GridMismatch);
        }
        if score != saved.score.current {
            return Err(RestoreError::ScoreMismatch);
        }

        let mut session = Self::new(seed, config);
        session.grid = grid;
        session.score = Score::new(saved.score.current, saved.score.best);
        session
            .history
            .restore(&saved.seed_tiles, saved.moves);
        session.won = grid.max_value() >= config.win_value;
        session.over = !has_legal_move(&grid);
        session.started = true;
        Ok(session)
    }

    /// Export what storage keeps
    pub fn saved(&self) -> SavedSession {
        let (grid, score) = match &self.replay {
            Some(replay) => (replay.resume.grid, replay.resume.score),
            None => (self.grid, self.score),
        };
        SavedSession {
            grid,
            score,
            moves: self.history.moves().to_vec(),
            seed_tiles: self.history.seed_tiles().to_vec(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn moves(&self) -> &[MoveRecord] {
        self.history.moves()
    }

    pub fn seed_tiles(&self) -> &[Tile] {
        self.history.seed_tiles()
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn is_replaying(&self) -> bool {
        self.replay.is_some()
    }

    /// Current spawner state (feed back into [`GameSession::new`] to continue)
    pub fn spawner_seed(&self) -> u32 {
        self.spawner.seed()
    }

    pub fn status(&self) -> GameStatus {
        if self.replay.is_some() {
            GameStatus::Replaying
        } else if self.over {
            GameStatus::GameOver
        } else if self.won {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    /// Which controls are valid right now
    pub fn controls(&self) -> ControlStates {
        ControlStates {
            undo: self.history.can_undo(),
            redo: self.history.can_redo(),
            replay: !self.history.moves().is_empty() && self.replay.is_none(),
            reset: true,
        }
    }

    /// `(applied, total)` while replaying
    pub fn replay_progress(&self) -> Option<(usize, usize)> {
        self.replay
            .map(|r| (r.cursor, self.history.moves().len()))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_rows(&mut out.grid);
        out.score = self.score;
        out.status = self.status();
        out.controls = self.controls();
        out.won = self.won;
        out.move_count = self.history.moves().len() as u32;
        out.replay_progress = self
            .replay_progress()
            .map(|(applied, total)| (applied as u32, total as u32));
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn state(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            score: self.score,
        }
    }

    fn outcome(&self, moved: bool, score_delta: u32, spawned: Option<Tile>) -> MoveOutcome {
        MoveOutcome {
            moved,
            score_delta,
            is_won: self.won,
            is_game_over: self.over,
            spawned,
        }
    }

    /// Shift tiles in a direction.
    ///
    /// Ignored while replaying. A direction that changes nothing returns
    /// `moved: false` and has no side effects.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.replay.is_some() || !self.started {
            return self.outcome(false, 0, None);
        }

        let (next, result) = resolve(&self.grid, direction, self.config.win_value);
        if !result.moved {
            return self.outcome(false, 0, None);
        }

        let before = self.state();
        self.grid = next;
        self.score.add(result.score_delta);
        let spawned = self.spawner.spawn(&mut self.grid);
        self.history.record(before, MoveRecord { direction, spawned });

        if result.reached_win_value {
            self.won = true;
        }
        self.over = !has_legal_move(&self.grid);

        self.outcome(true, result.score_delta, spawned)
    }

    fn restore_state(&mut self, snapshot: Snapshot) {
        self.grid = snapshot.grid;
        self.score.restore(snapshot.score);
        self.won = self.won || self.grid.max_value() >= self.config.win_value;
        self.over = !has_legal_move(&self.grid);
    }

    /// Go back one move. Cancels a running replay first.
    pub fn undo(&mut self) -> bool {
        self.cancel_replay();
        let current = self.state();
        match self.history.undo(current) {
            Some(before) => {
                self.restore_state(before);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone move. Cancels a running replay first.
    pub fn redo(&mut self) -> bool {
        self.cancel_replay();
        let current = self.state();
        match self.history.redo(current) {
            Some(after) => {
                self.restore_state(after);
                true
            }
            None => false,
        }
    }

    /// Start a new game in place.
    ///
    /// `full_wipe` also clears the best score. Cancels a running replay first.
    pub fn reset(&mut self, full_wipe: bool) {
        self.cancel_replay();
        self.score.reset(full_wipe);
        self.won = false;
        self.over = false;
        self.started = true;
        self.seed_grid();
    }

    /// Begin replaying the move log from the seed tiles.
    ///
    /// Returns false when there is nothing to replay or a replay is running.
    pub fn start_replay(&mut self) -> bool {
        if self.replay.is_some() || self.history.moves().is_empty() {
            return false;
        }

        self.replay = Some(ReplayState {
            cursor: 0,
            resume: self.state(),
            resume_won: self.won,
            resume_over: self.over,
        });

        // Seed tiles were validated when recorded or restored.
        self.grid = Grid::try_from_tiles(self.history.seed_tiles()).unwrap_or_default();
        self.score.current = 0;
        true
    }

    /// Apply the next recorded move.
    ///
    /// Returns the applied record, or None when no replay is running. Applying the
    /// last record ends the replay.
    pub fn replay_step(&mut self) -> Option<MoveRecord> {
        let mut replay = self.replay?;
        let record = *self.history.moves().get(replay.cursor)?;

        let (next, result) = resolve(&self.grid, record.direction, self.config.win_value);
        self.grid = next;
        self.score.add(result.score_delta);
        if let Some(tile) = record.spawned {
            debug_assert!(self.grid.is_empty_at(tile.position));
            self.grid.set(tile.position, tile.value);
        }

        replay.cursor += 1;
        if replay.cursor >= self.history.moves().len() {
            debug_assert_eq!(self.grid, replay.resume.grid);
            debug_assert_eq!(self.score.current, replay.resume.score.current);
            self.won = replay.resume_won;
            self.over = replay.resume_over;
            self.replay = None;
        } else {
            self.replay = Some(replay);
        }
        Some(record)
    }

    /// Stop a running replay, restoring the state it started from.
    ///
    /// Returns false when no replay was running.
    pub fn cancel_replay(&mut self) -> bool {
        let Some(replay) = self.replay.take() else {
            return false;
        };
        self.grid = replay.resume.grid;
        self.score.restore(replay.resume.score);
        self.won = replay.resume_won;
        self.over = replay.resume_over;
        true
    }

    /// Apply a game action
    ///
    /// Returns true when the session changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Move(direction) => self.apply_move(direction).moved,
            GameAction::Undo => self.undo(),
            GameAction::Redo => self.redo(),
            GameAction::Replay => self.start_replay(),
            GameAction::Reset => {
                self.reset(false);
                true
            }
            GameAction::ResetAll => {
                self.reset(true);
                true
            }
        }
    }

    /// Build a session around a fixed grid (no seed tiles, no log)
    #[cfg(test)]
    pub(crate) fn from_grid(grid: Grid, seed: u32) -> Self {
        let mut session = Self::new(seed, SessionConfig::default());
        session.grid = grid;
        session.started = true;
        session.over = !has_legal_move(&grid);
        session
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1, SessionConfig::default())
    }
}
