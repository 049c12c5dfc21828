//! Denial taxonomy for transition attempts.

use crate::board::domain::{ColumnId, TaskId};
use std::fmt;
use thiserror::Error;

/// Entity whose lookup failed during a transition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingEntity {
    /// The task to move.
    Task(TaskId),
    /// The destination column.
    Column(ColumnId),
}

impl fmt::Display for MissingEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task(id) => write!(f, "task {id}"),
            Self::Column(id) => write!(f, "column {id}"),
        }
    }
}

/// Terminal outcome of a denied transition attempt.
///
/// Exactly one of these is returned per denied attempt; none are retried
/// automatically. Every variant renders the short, human-readable reason
/// surfaced to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// At least one active dependency edge blocks the task. Never
    /// overridable: blocking is a data-integrity constraint, not policy.
    #[error("task is blocked by another task")]
    Blocked,

    /// The task's sprint has been completed. Not overridable either; the
    /// sprint lock is treated as policy-equivalent to blocking for safety.
    #[error("sprint is closed")]
    SprintLocked,

    /// The destination column is at its WIP capacity. Overridable by an
    /// admin moving with the force flag.
    #[error("WIP limit exceeded for column '{column}'")]
    WipExceeded {
        /// Display name of the full column.
        column: String,
        /// Configured capacity.
        limit: u32,
        /// Occupancy observed at validation time.
        occupancy: u32,
    },

    /// The task or destination column does not exist.
    #[error("{0} not found")]
    NotFound(MissingEntity),

    /// The caller's role may not move tasks at all.
    #[error("role '{role}' may not move tasks")]
    Unauthorized {
        /// Role reported by the identity provider.
        role: String,
    },

    /// Infrastructure failure during validation or the write. The only
    /// denial a client may sensibly suggest retrying.
    #[error("system error: {0}")]
    System(String),
}

impl TransitionError {
    /// Wraps an infrastructure failure. Rule evaluation fails closed: a
    /// lookup that cannot complete denies the move rather than letting a
    /// constraint be silently bypassed.
    pub fn system(err: impl fmt::Display) -> Self {
        Self::System(err.to_string())
    }

    /// Returns whether a client-side retry suggestion is appropriate.
    ///
    /// Business-rule denials are definitive for the same inputs and must
    /// not be retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::System(_))
    }
}
