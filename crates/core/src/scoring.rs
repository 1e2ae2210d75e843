//! Scoring module - current and best score
//!
//! Every merge adds the value of the tile it produces. `best` only ever grows while
//! a session lives; only a full wipe resets it.

/// Current and best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Score {
    pub current: u32,
    pub best: u32,
}

impl Score {
    pub fn new(current: u32, best: u32) -> Self {
        Self {
            current,
            best: best.max(current),
        }
    }

    /// Add a move's merge total, raising `best` when it is passed
    pub fn add(&mut self, delta: u32) {
        self.current = self.current.saturating_add(delta);
        self.best = self.best.max(self.current);
    }

    /// Take `current` from an earlier score without lowering `best`
    pub fn restore(&mut self, earlier: Score) {
        self.current = earlier.current;
        self.best = self.best.max(earlier.best).max(self.current);
    }

    /// Start a new game
    ///
    /// `full_wipe` clears the best score too.
    pub fn reset(&mut self, full_wipe: bool) {
        self.current = 0;
        if full_wipe {
            self.best = 0;
        }
    }
}
