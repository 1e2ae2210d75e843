//! RNG module - tile spawning
//!
//! The spawner picks a uniformly random empty cell and places a 2 or a 4 there,
//! each with probability 1/2 (`FOUR_TILE_PERCENT`).
//!
//! Randomness comes from a simple LCG so a seed reproduces a whole game.

use crate::grid::Grid;
use crate::types::{Tile, FOUR_TILE_PERCENT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG cycle with
    /// short periods (bit 0 simply alternates).
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (feeding it back into `new` continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Places new tiles on empty cells
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: SimpleRng,
}

impl Spawner {
    /// Create a new spawner with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Place one tile on a random empty cell.
    ///
    /// Returns None (and leaves the grid untouched) when no cell is empty.
    pub fn spawn(&mut self, grid: &mut Grid) -> Option<Tile> {
        let empty = grid.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let position = empty[self.rng.next_range(empty.len() as u32) as usize];
        let value = if self.rng.next_range(100) < FOUR_TILE_PERCENT {
            4
        } else {
            2
        };

        grid.set(position, value);
        Some(Tile::new(position, value))
    }

    /// Get the current RNG state (for continuing the sequence after a restart)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(1)
    }
}
