//! History module - undo/redo and the move log
//!
//! History is linear: recording a new move discards anything that could be redone.
//! Each undo entry belongs to the newest move of the log, so undoing pops the log
//! entry as well and redoing pushes it back. The log therefore always describes how
//! to get from the seed tiles to the current grid.
//!
//! Depth 1 gives the classic single undo slot; larger depths keep a bounded deque.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::snapshot::Snapshot;
use crate::types::{MoveRecord, Tile, DEFAULT_UNDO_DEPTH, SEED_TILE_COUNT};

#[derive(Debug, Clone)]
pub struct History {
    depth: usize,
    undo: VecDeque<Snapshot>,
    /// (state to restore, move that produced it)
    redo: Vec<(Snapshot, MoveRecord)>,
    moves: Vec<MoveRecord>,
    seed_tiles: ArrayVec<Tile, SEED_TILE_COUNT>,
}

impl History {
    /// Create an empty history keeping at most `depth` undo entries (minimum 1)
    pub fn new(depth: usize) -> Self {
        Self {
            depth: depth.max(1),
            undo: VecDeque::new(),
            redo: Vec::new(),
            moves: Vec::new(),
            seed_tiles: ArrayVec::new(),
        }
    }

    /// Drop everything and start over from new seed tiles
    pub fn reset(&mut self, seed_tiles: &[Tile]) {
        self.undo.clear();
        self.redo.clear();
        self.moves.clear();
        self.seed_tiles = seed_tiles.iter().copied().take(SEED_TILE_COUNT).collect();
    }

    /// Restore a log loaded from storage (undo/redo are not persisted)
    pub fn restore(&mut self, seed_tiles: &[Tile], moves: Vec<MoveRecord>) {
        self.reset(seed_tiles);
        self.moves = moves;
    }

    /// Record a committed move together with the state before it
    pub fn record(&mut self, before: Snapshot, record: MoveRecord) {
        self.redo.clear();
        self.push_undo(before);
        self.moves.push(record);
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        if self.undo.len() == self.depth {
            self.undo.pop_front();
        }
        self.undo.push_back(snapshot);
    }

    /// Step back one move. `current` becomes redoable.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let before = self.undo.pop_back()?;
        let Some(record) = self.moves.pop() else {
            // Undo entries never outnumber the log.
            self.undo.push_back(before);
            return None;
        };
        self.redo.push((current, record));
        Some(before)
    }

    /// Step forward one undone move. `current` becomes undoable again.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let (after, record) = self.redo.pop()?;
        self.push_undo(current);
        self.moves.push(record);
        Some(after)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn seed_tiles(&self) -> &[Tile] {
        &self.seed_tiles
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::scoring::Score;
    use crate::types::{Direction, Position};

    fn snap(score: u32) -> Snapshot {
        Snapshot {
            grid: Grid::new(),
            score: Score::new(score, score),
        }
    }

    fn left() -> MoveRecord {
        MoveRecord {
            direction: Direction::Left,
            spawned: Some(Tile::new(Position::new(0, 3), 2)),
        }
    }

    #[test]
    fn test_single_level_undo_redo() {
        let mut h = History::new(1);
        h.record(snap(0), left());
        h.record(snap(4), left());
        assert_eq!(h.undo_len(), 1);
        assert_eq!(h.moves().len(), 2);

        let restored = h.undo(snap(8)).unwrap();
        assert_eq!(restored.score.current, 4);
        assert_eq!(h.moves().len(), 1);
        assert!(!h.can_undo());
        assert!(h.can_redo());
        assert!(h.undo(snap(4)).is_none());

        let redone = h.redo(snap(4)).unwrap();
        assert_eq!(redone.score.current, 8);
        assert_eq!(h.moves().len(), 2);
        assert!(h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn test_new_move_clears_redo() {
        let mut h = History::new(1);
        h.record(snap(0), left());
        h.undo(snap(4)).unwrap();
        assert!(h.can_redo());

        h.record(snap(0), left());
        assert!(!h.can_redo());
    }

    #[test]
    fn test_multi_level_depth_is_bounded() {
        let mut h = History::new(3);
        for i in 0..5 {
            h.record(snap(i), left());
        }
        assert_eq!(h.undo_len(), 3);
        assert_eq!(h.undo(snap(5)).unwrap().score.current, 4);
        assert_eq!(h.undo(snap(4)).unwrap().score.current, 3);
        assert_eq!(h.undo(snap(3)).unwrap().score.current, 2);
        assert!(h.undo(snap(2)).is_none());
        assert_eq!(h.moves().len(), 2);
    }

    #[test]
    fn test_reset_keeps_only_seed_tiles() {
        let mut h = History::new(1);
        h.record(snap(0), left());
        let seeds = [
            Tile::new(Position::new(0, 0), 2),
            Tile::new(Position::new(1, 1), 4),
        ];
        h.reset(&seeds);
        assert!(h.moves().is_empty());
        assert!(!h.can_undo());
        assert_eq!(h.seed_tiles(), &seeds);
    }
}
