//! Saving and loading sessions through a [`KeyValueStore`].
//!
//! Two keys are used:
//!
//! | Key          | Value                                   |
//! |--------------|-----------------------------------------|
//! | `gameState`  | the [`GameRecord`](crate::record::GameRecord) JSON |
//! | `bestScore`  | best score as a JSON number             |
//!
//! The best score lives under its own key so that clearing a finished game does
//! not lose it. Loading never fails: missing or malformed data yields `None` and
//! a warning.

use tracing::{debug, instrument, warn};

use crate::core::{GameSession, SessionConfig};
use crate::error::PersistError;
use crate::record;
use crate::store::KeyValueStore;

pub const GAME_STATE_KEY: &str = "gameState";
pub const BEST_SCORE_KEY: &str = "bestScore";

#[derive(Debug, Clone)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Read and rebuild the saved session
    pub fn try_load(
        &self,
        seed: u32,
        config: SessionConfig,
    ) -> Result<Option<GameSession>, PersistError> {
        let Some(json) = self.store.get(GAME_STATE_KEY)? else {
            return Ok(None);
        };
        let saved = record::from_json(&json)?;
        let session = GameSession::restore(saved, seed, config)?;
        Ok(Some(session.with_best(self.load_best())))
    }

    /// Load the saved session, or `None` when there is nothing usable
    #[instrument(skip(self))]
    pub fn load(&self, seed: u32, config: SessionConfig) -> Option<GameSession> {
        match self.try_load(seed, config) {
            Ok(Some(session)) => {
                debug!(moves = session.moves().len(), "restored saved game");
                Some(session)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "ignoring saved game");
                None
            }
        }
    }

    /// Best score on record (0 when absent or unreadable)
    pub fn load_best(&self) -> u32 {
        let parsed = self
            .store
            .get(BEST_SCORE_KEY)
            .and_then(|value| match value {
                Some(json) => Ok(Some(serde_json::from_str::<u32>(json.trim())?)),
                None => Ok(None),
            });
        match parsed {
            Ok(best) => best.unwrap_or(0),
            Err(e) => {
                warn!(error = %e, "ignoring saved best score");
                0
            }
        }
    }

    /// Write the session and its best score
    pub fn save(&mut self, session: &GameSession) -> Result<(), PersistError> {
        let saved = session.saved();
        self.store.set(GAME_STATE_KEY, &record::to_json(&saved)?)?;
        self.save_best(saved.score.best)
    }

    pub fn save_best(&mut self, best: u32) -> Result<(), PersistError> {
        self.store.set(BEST_SCORE_KEY, &serde_json::to_string(&best)?)
    }

    /// Remove the saved game, keeping the best score
    pub fn clear_game(&mut self) -> Result<(), PersistError> {
        self.store.remove(GAME_STATE_KEY)
    }

    /// Remove everything
    pub fn wipe(&mut self) -> Result<(), PersistError> {
        self.store.remove(GAME_STATE_KEY)?;
        self.store.remove(BEST_SCORE_KEY)
    }
}
