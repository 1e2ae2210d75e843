//! Persistence error types.

use derive_more::{Display, Error, From};

use crate::core::RestoreError;

/// Anything that can go wrong reading or writing a saved game
#[derive(Debug, Display, Error, From)]
pub enum PersistError {
    /// Store I/O failed
    #[display("store I/O failed: {_0}")]
    Io(std::io::Error),
    /// Record is not valid JSON or misses required fields
    #[display("saved game is not valid JSON: {_0}")]
    Json(serde_json::Error),
    /// Record parsed but breaks a game invariant
    #[display("saved game is invalid: {_0}")]
    #[from(ignore)]
    Invalid(#[error(not(source))] String),
    /// Move log does not reproduce the saved grid
    #[display("saved game does not replay: {_0}")]
    Restore(RestoreError),
}

impl PersistError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
