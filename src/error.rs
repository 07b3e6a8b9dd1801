//! Engine error types.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::validation::TeamNameError;

/// Errors returned by [`Planner`](crate::scheduler::Planner) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The candidate failed one or more constraints. Reasons are
    /// deduplicated and in validation order.
    #[error("rejected: {}", .reasons.join("; "))]
    Rejected { reasons: Vec<String> },

    #[error("match not found: {0}")]
    MatchNotFound(String),

    #[error("a match with id {0} is already scheduled")]
    DuplicateMatch(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// The resource is still assigned to matches that have not started.
    #[error("resource {id} is assigned to {} upcoming match(es): {}", .upcoming.len(), .upcoming.join(", "))]
    ResourceInUse { id: String, upcoming: Vec<String> },

    #[error("duplicate resource id: {0}")]
    DuplicateResource(String),

    #[error("invalid interval: end {end} is not after start {start}")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error(transparent)]
    InvalidTeamName(#[from] TeamNameError),
}

impl SchedulerError {
    /// Rejection reasons, empty for every other variant.
    pub fn reasons(&self) -> &[String] {
        match self {
            Self::Rejected { reasons } => reasons,
            _ => &[],
        }
    }
}

/// Result alias for engine operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;
