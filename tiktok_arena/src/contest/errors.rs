//! Error types for bracket generation

use thiserror::Error;

/// Fewest entries either contest type can be built from
pub const MIN_CONTEST_ENTRIES: usize = 2;

/// Result type for contest operations
pub type ContestResult<T> = Result<T, ContestError>;

/// Bracket generation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContestError {
    /// Too few entries to play a single match
    #[error("Not enough entries for a contest: need {needed}, have {actual}")]
    NotEnoughEntries { needed: usize, actual: usize },

    /// Contest type token not recognized
    #[error("Provided not allowed contest type: {0}")]
    UnknownContestType(String),
}
