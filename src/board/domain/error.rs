//! Error types for board domain validation and parsing.

use super::{SprintId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The column display name is empty after trimming.
    #[error("column name must not be empty")]
    EmptyColumnName,

    /// The WIP limit is zero; limits must be positive or unset.
    #[error("WIP limit must be a positive integer")]
    ZeroWipLimit,

    /// The task is already marked as deleted.
    #[error("task {0} is already deleted")]
    TaskAlreadyDeleted(TaskId),

    /// The dependency edge would make a task block itself.
    #[error("task {0} cannot be blocked by itself")]
    SelfDependency(TaskId),

    /// The task already belongs to a sprint.
    #[error("task {task} is already assigned to sprint {sprint}")]
    SprintAlreadyAssigned {
        /// Task carrying the existing assignment.
        task: TaskId,
        /// Sprint the task is already assigned to.
        sprint: SprintId,
    },
}

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing sprint statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sprint status: {0}")]
pub struct ParseSprintStatusError(pub String);

/// Error returned while parsing actor roles from the identity provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown actor role: {0}")]
pub struct ParseActorRoleError(pub String);
