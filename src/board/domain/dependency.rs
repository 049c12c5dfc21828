//! Blocking dependency edges between tasks.

use super::{BoardDomainError, TaskId};
use serde::{Deserialize, Serialize};

/// Directed relation "task is blocked by another task".
///
/// A task with at least one active incoming edge cannot transition at all;
/// blocking is total rather than column-specific. Edges are created and
/// removed explicitly by authorized actors. No cycle detection is
/// performed: a cycle leaves every task on it non-transitionable until an
/// edge is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    task_id: TaskId,
    blocked_by: TaskId,
}

impl DependencyEdge {
    /// Creates a validated dependency edge.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::SelfDependency`] when a task would block
    /// itself.
    pub fn new(task_id: TaskId, blocked_by: TaskId) -> Result<Self, BoardDomainError> {
        if task_id == blocked_by {
            return Err(BoardDomainError::SelfDependency(task_id));
        }
        Ok(Self {
            task_id,
            blocked_by,
        })
    }

    /// Returns the blocked task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the blocking task.
    #[must_use]
    pub const fn blocked_by(&self) -> TaskId {
        self.blocked_by
    }
}
