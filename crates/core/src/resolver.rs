//! Move resolution - slide, merge, re-slide
//!
//! Every row (Left/Right) or column (Up/Down) is resolved independently. A line is
//! read into a small array ordered from the edge tiles move towards, so the
//! per-line algorithm only ever packs towards index 0:
//!
//! 1. **Slide**: pack non-empty values towards index 0, keeping their order
//! 2. **Merge**: scan from index 0; equal neighbours merge into the lower index,
//!    the consumed slot becomes empty and the scan skips past it, so no tile
//!    takes part in two merges during one move
//! 3. **Re-slide**: close the gaps the merges left
//!
//! Score for a merge is the new (doubled) value.

use crate::grid::{Grid, LINE_LEN};
use crate::types::{Direction, GRID_SIZE};

/// Result of resolving one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineResult {
    pub moved: bool,
    pub score_delta: u32,
    pub merges: u8,
}

/// Result of resolving a whole grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    /// Any tile changed position or any merge happened
    pub moved: bool,
    pub score_delta: u32,
    pub merges: u8,
    /// Some tile is at or above the win threshold after the move
    pub reached_win_value: bool,
}

/// Pack non-zero values towards index 0, preserving order
fn slide(line: &mut [u32]) {
    let mut write = 0;
    for read in 0..line.len() {
        let value = line[read];
        if value != 0 {
            line[read] = 0;
            line[write] = value;
            write += 1;
        }
    }
}

/// Merge equal neighbours of a packed line, returning (score, merges)
fn merge(line: &mut [u32]) -> (u32, u8) {
    let mut score = 0;
    let mut merges = 0;
    let mut i = 0;
    while i + 1 < line.len() {
        if line[i] != 0 && line[i] == line[i + 1] {
            line[i] *= 2;
            line[i + 1] = 0;
            score += line[i];
            merges += 1;
            // The merged tile and the consumed one are both done for this move.
            i += 2;
        } else {
            i += 1;
        }
    }
    (score, merges)
}

/// Resolve one line whose index 0 is the edge tiles move towards.
///
/// Lines with zero or one tile can only slide.
pub fn resolve_line(line: &mut [u32]) -> LineResult {
    let mut before = [0u32; LINE_LEN];
    let len = line.len().min(LINE_LEN);
    before[..len].copy_from_slice(&line[..len]);

    slide(line);
    let (score_delta, merges) = merge(line);
    if merges > 0 {
        slide(line);
    }

    LineResult {
        moved: merges > 0 || line[..len] != before[..len],
        score_delta,
        merges,
    }
}

/// Resolve a move without touching the input grid.
///
/// Returns the resulting grid together with what happened. When `moved` is false
/// the returned grid equals the input.
pub fn resolve(grid: &Grid, direction: Direction, win_value: u32) -> (Grid, MoveResult) {
    let mut next = *grid;
    let mut result = MoveResult::default();

    for index in 0..GRID_SIZE {
        let positions = Grid::line(direction, index);
        let mut values = [0u32; LINE_LEN];
        for (value, &pos) in values.iter_mut().zip(positions.iter()) {
            *value = grid.get(pos);
        }

        let line = resolve_line(&mut values);
        if !line.moved {
            continue;
        }

        for (&value, &pos) in values.iter().zip(positions.iter()) {
            next.set(pos, value);
        }
        result.moved = true;
        result.score_delta += line.score_delta;
        result.merges += line.merges;
    }

    result.reached_win_value = next.max_value() >= win_value;
    (next, result)
}

/// Check if a direction would change the grid (dry run)
pub fn can_move(grid: &Grid, direction: Direction) -> bool {
    for index in 0..GRID_SIZE {
        let mut previous = 0;
        let mut seen_gap = false;
        for pos in Grid::line(direction, index) {
            let value = grid.get(pos);
            if value == 0 {
                seen_gap = true;
                continue;
            }
            // A tile behind a gap slides; a tile equal to its packed neighbour merges.
            if seen_gap || value == previous {
                return true;
            }
            previous = value;
        }
    }
    false
}

/// Check if any direction would change the grid
pub fn has_legal_move(grid: &Grid) -> bool {
    !grid.is_full() || Direction::ALL.iter().any(|&d| can_move(grid, d))
}
