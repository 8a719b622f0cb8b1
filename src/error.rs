//! Error types for the doubles scheduler
//!
//! Domain failures are modelled as `SchedulingError` and travel through
//! `anyhow` so callers can downcast when they need the variant.

use crate::types::{CourtId, PlayerId, ResultId};

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for scheduling and ranking scenarios
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulingError {
    #[error("At least 4 players are required to generate pairings (got {count})")]
    NotEnoughPlayers { count: usize },

    #[error("The number of players must be a multiple of 4 (got {count})")]
    PlayerCountNotMultipleOfFour { count: usize },

    #[error("Not enough courts available: {required} required, {available} available")]
    NotEnoughCourts { required: usize, available: usize },

    #[error("Player {player_id} appears more than once in the pool")]
    DuplicatePlayer { player_id: PlayerId },

    #[error("Number of sets must be at least 1 (got {sets})")]
    InvalidSets { sets: u32 },

    #[error("Unknown court: {court_id}")]
    UnknownCourt { court_id: CourtId },

    #[error("Court name '{name}' is not in the list of allowed courts")]
    CourtNameNotAllowed { name: String },

    #[error("Court '{name}' already exists")]
    DuplicateCourt { name: String },

    #[error("Unknown player: {player_id}")]
    UnknownPlayer { player_id: PlayerId },

    #[error("Player {player_id} is referenced by recorded results and cannot be deleted")]
    PlayerReferenced { player_id: PlayerId },

    #[error("Invalid player: {reason}")]
    InvalidPlayer { reason: String },

    #[error("Invalid match result: {reason}")]
    InvalidResult { reason: String },

    #[error("Match result not found: {result_id}")]
    ResultNotFound { result_id: ResultId },

    #[error("Duplicate {entity} id: {id}")]
    DuplicateRecord { entity: &'static str, id: u32 },

    #[error("Record not found: {entity} {id}")]
    NotFound { entity: &'static str, id: u32 },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl SchedulingError {
    /// Whether the error is a recoverable input validation failure
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            SchedulingError::Storage { .. } | SchedulingError::NotFound { .. }
        )
    }
}
