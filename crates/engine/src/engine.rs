//! The engine: one [`GameSession`] plus its persistence and replay timing.
//!
//! Every mutating call runs to completion before the next one starts. After a
//! change the session is written back to the store; a finished game removes the
//! saved record and keeps only the best score.
//!
//! Replay can be driven two ways:
//!
//! - [`Engine::tick`] from a fixed-timestep loop (the terminal front-end)
//! - [`Engine::replay`], which awaits the replay interval between moves and
//!   streams one [`GameSnapshot`] per move

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

use crate::adapter::{FileStore, KeyValueStore, MemoryStore, Persistence};
use crate::config::EngineConfig;
use crate::core::{GameSession, GameSnapshot, SessionConfig};
use crate::types::{ControlStates, Direction, GameAction, MoveOutcome};

/// Store chosen at runtime by [`Engine::open`]
pub type DynStore = Box<dyn KeyValueStore + Send>;

/// How an async replay ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayEnd {
    /// Every recorded move was applied
    Finished,
    /// Stopped early; the pre-replay state is back
    Cancelled,
    /// Nothing to replay
    NotStarted,
}

pub struct Engine<S = DynStore> {
    session: GameSession,
    persistence: Persistence<S>,
    replay_interval_ms: u32,
    replay_timer_ms: u32,
}

impl Engine<DynStore> {
    /// Open the configured store and restore the saved game, or start a new one
    pub fn open(config: &EngineConfig) -> Self {
        let store: DynStore = if config.persist_disabled {
            Box::new(MemoryStore::new())
        } else {
            match FileStore::open(&config.store_dir) {
                Ok(store) => Box::new(store),
                Err(e) => {
                    warn!(
                        error = %e,
                        dir = %config.store_dir.display(),
                        "store unavailable, keeping saves in memory"
                    );
                    Box::new(MemoryStore::new())
                }
            }
        };
        Self::with_store(store, config)
    }
}

impl<S: KeyValueStore> Engine<S> {
    pub fn with_store(store: S, config: &EngineConfig) -> Self {
        let persistence = Persistence::new(store);
        let session_config = config.session_config();

        let session = match persistence.load(config.seed, session_config) {
            Some(session) => {
                info!(
                    moves = session.moves().len(),
                    score = session.score().current,
                    "restored saved game"
                );
                session
            }
            None => Self::fresh(&persistence, config.seed, session_config),
        };

        let mut engine = Self {
            session,
            persistence,
            replay_interval_ms: config.replay_interval_ms,
            replay_timer_ms: 0,
        };
        engine.persist();
        engine
    }

    fn fresh(persistence: &Persistence<S>, seed: u32, config: SessionConfig) -> GameSession {
        let mut session = GameSession::new(seed, config).with_best(persistence.load_best());
        session.start();
        info!(seed, best = session.score().best, "started new game");
        session
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn replay_interval(&self) -> Duration {
        Duration::from_millis(self.replay_interval_ms as u64)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.session.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.session.snapshot_into(out);
    }

    pub fn controls(&self) -> ControlStates {
        self.session.controls()
    }

    /// Write the session back, or drop the record once the game is over
    fn persist(&mut self) {
        let result = if self.session.is_over() {
            let best = self.session.score().best;
            self.persistence
                .clear_game()
                .and_then(|()| self.persistence.save_best(best))
        } else {
            self.persistence.save(&self.session)
        };
        if let Err(e) = result {
            warn!(error = %e, "failed to save game");
        }
    }

    #[instrument(skip(self))]
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let was_won = self.session.is_won();
        let outcome = self.session.apply_move(direction);
        if !outcome.moved {
            return outcome;
        }

        debug!(
            score_delta = outcome.score_delta,
            score = self.session.score().current,
            "move committed"
        );
        if outcome.is_won && !was_won {
            info!(
                score = self.session.score().current,
                win_value = self.session.config().win_value,
                "win value reached"
            );
        }
        if outcome.is_game_over {
            info!(
                score = self.session.score().current,
                best = self.session.score().best,
                moves = self.session.moves().len(),
                "game over"
            );
        }
        self.persist();
        outcome
    }

    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        self.replay_timer_ms = 0;
        let changed = self.session.undo();
        if changed {
            debug!(score = self.session.score().current, "undo");
            self.persist();
        }
        changed
    }

    #[instrument(skip(self))]
    pub fn redo(&mut self) -> bool {
        self.replay_timer_ms = 0;
        let changed = self.session.redo();
        if changed {
            debug!(score = self.session.score().current, "redo");
            self.persist();
        }
        changed
    }

    /// Start over. `full_wipe` also erases the best score and the store.
    #[instrument(skip(self))]
    pub fn reset(&mut self, full_wipe: bool) {
        self.replay_timer_ms = 0;
        self.session.reset(full_wipe);
        if full_wipe {
            if let Err(e) = self.persistence.wipe() {
                warn!(error = %e, "failed to wipe saved data");
            }
        }
        info!(full_wipe, "game reset");
        self.persist();
    }

    #[instrument(skip(self))]
    pub fn start_replay(&mut self) -> bool {
        let started = self.session.start_replay();
        if started {
            self.replay_timer_ms = 0;
            info!(moves = self.session.moves().len(), "replay started");
        }
        started
    }

    /// Stop a running replay and put back the state it started from
    #[instrument(skip(self))]
    pub fn cancel_replay(&mut self) -> bool {
        self.replay_timer_ms = 0;
        let cancelled = self.session.cancel_replay();
        if cancelled {
            info!("replay cancelled");
        }
        cancelled
    }

    /// Apply the next recorded move and return the frame
    fn replay_step(&mut self) -> Option<GameSnapshot> {
        let record = self.session.replay_step()?;
        debug!(
            direction = record.direction.as_str(),
            progress = ?self.session.replay_progress(),
            "replay step"
        );
        if !self.session.is_replaying() {
            info!(score = self.session.score().current, "replay finished");
        }
        Some(self.session.snapshot())
    }

    /// Advance replay timing by `elapsed_ms`.
    ///
    /// Returns a snapshot when a recorded move was applied. Does nothing unless a
    /// replay is running.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<GameSnapshot> {
        if !self.session.is_replaying() {
            self.replay_timer_ms = 0;
            return None;
        }
        self.replay_timer_ms = self.replay_timer_ms.saturating_add(elapsed_ms);
        if self.replay_timer_ms < self.replay_interval_ms {
            return None;
        }
        self.replay_timer_ms = 0;
        self.replay_step()
    }

    /// Run a whole replay, pausing the replay interval between moves.
    ///
    /// The starting grid and every replayed move are sent on `frames`. Setting
    /// `cancel` to true, or dropping the frame receiver, stops the replay and
    /// restores the pre-replay state.
    #[instrument(skip_all)]
    pub async fn replay(
        &mut self,
        frames: mpsc::Sender<GameSnapshot>,
        mut cancel: watch::Receiver<bool>,
    ) -> ReplayEnd {
        if !self.session.is_replaying() && !self.start_replay() {
            return ReplayEnd::NotStarted;
        }
        if *cancel.borrow_and_update() || frames.send(self.snapshot()).await.is_err() {
            self.cancel_replay();
            return ReplayEnd::Cancelled;
        }

        let interval = self.replay_interval();
        while self.session.is_replaying() {
            if wait_or_cancel(interval, &mut cancel).await {
                self.cancel_replay();
                return ReplayEnd::Cancelled;
            }
            let Some(frame) = self.replay_step() else {
                break;
            };
            if frames.send(frame).await.is_err() && self.session.is_replaying() {
                self.cancel_replay();
                return ReplayEnd::Cancelled;
            }
        }
        ReplayEnd::Finished
    }

    #[instrument(skip(self))]
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
}

/// Sleep for `interval`; true when the cancel flag is raised first.
///
/// A dropped cancel sender can no longer cancel, so the sleep just runs out.
async fn wait_or_cancel(interval: Duration, cancel: &mut watch::Receiver<bool>) -> bool {
    let sleep = tokio::time::sleep(interval);
    tokio::pin!(sleep);
    loop {
        tokio::select! {
            _ = &mut sleep => return *cancel.borrow(),
            changed = cancel.changed() => match changed {
                Ok(()) => {
                    if *cancel.borrow_and_update() {
                        return true;
                    }
                }
                Err(_) => {
                    (&mut sleep).await;
                    return false;
                }
            },
        }
    }
}
