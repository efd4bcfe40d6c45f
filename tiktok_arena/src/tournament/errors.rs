//! Tournament error types.

use thiserror::Error;

use super::models::TournamentId;
use crate::contest::ContestError;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Tournament not found: {0}")]
    NotFound(TournamentId),

    #[error("Tournament {0} already exists")]
    AlreadyExists(String),

    #[error("Tournament size and count of tiktoks mismatch ({size} != {count})")]
    SizeMismatch { size: usize, count: usize },

    #[error("Tournament size {size} out of range: must be between {min} and {max}")]
    InvalidSize { size: usize, min: usize, max: usize },

    #[error("Invalid field: {0} must not be empty")]
    InvalidField(&'static str),

    #[error("Tiktok {0} appears more than once")]
    DuplicateTiktok(String),

    #[error("Provided empty tiktok URL")]
    EmptyTiktokUrl,

    #[error("Tiktok {0} is not part of the tournament")]
    TiktokNotFound(String),

    #[error("Contest error: {0}")]
    Contest(#[from] ContestError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl TournamentError {
    /// Get a client-safe error message
    ///
    /// Database errors are replaced so SQL details never reach clients.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Database(_) => "Internal server error".to_string(),
            TournamentError::Contest(inner) => inner.to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
