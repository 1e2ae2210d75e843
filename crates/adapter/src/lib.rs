//! Adapter module - saving sessions between runs
//!
//! A session is stored as a JSON record under the `gameState` key of a
//! [`KeyValueStore`], with the best score kept separately under `bestScore`.
//!
//! # Layers
//!
//! - [`record`]: the JSON shape and its validation
//! - [`store`]: string key-value stores ([`FileStore`], [`MemoryStore`])
//! - [`persistence`]: load/save/clear of a [`GameSession`](core::GameSession)
//!
//! # Loading
//!
//! A stored record is only accepted when it parses, every value is a legal tile,
//! and replaying its move log from the seed tiles reproduces the stored grid and
//! score. Anything else is logged and treated as "no saved game".
//!
//! # Example
//!
//! ```
//! use tui_2048_adapter::{MemoryStore, Persistence};
//! use tui_2048_core::{GameSession, SessionConfig};
//!
//! let mut game = GameSession::new(1, SessionConfig::default());
//! game.start();
//!
//! let mut persistence = Persistence::new(MemoryStore::new());
//! persistence.save(&game).unwrap();
//!
//! let loaded = persistence.load(2, SessionConfig::default()).unwrap();
//! assert_eq!(loaded.grid(), game.grid());
//! ```

pub mod error;
pub mod persistence;
pub mod record;
pub mod store;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use error::PersistError;
pub use persistence::{Persistence, BEST_SCORE_KEY, GAME_STATE_KEY};
pub use record::{from_json, to_json, GameRecord};
pub use store::{FileStore, KeyValueStore, MemoryStore};
