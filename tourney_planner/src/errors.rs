//! Planner error types.

use thiserror::Error;

/// Errors raised while generating or planning a tournament.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Missing or malformed team count, name list or option
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Fewer than two teams were given to the planner
    #[error("Insufficient teams: need at least 2, have {teams}")]
    InsufficientTeams { teams: usize },

    /// A stage received a document without a schedule
    #[error("Missing schedule: {0}")]
    MissingSchedule(String),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unreadable input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlannerError {
    /// Shorthand for [`PlannerError::InvalidArgument`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        PlannerError::InvalidArgument(reason.into())
    }
}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
