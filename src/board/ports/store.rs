//! Store ports for board persistence, lookup, and occupancy queries.

use crate::board::domain::{
    Column, ColumnId, DependencyEdge, ProjectId, Sprint, SprintId, Task, TaskId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateTask`] when the task ID already
    /// exists.
    async fn insert_task(&self, task: &Task) -> StoreResult<()>;

    /// Finds a task by identifier, including soft-deleted records.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> StoreResult<Option<Task>>;

    /// Persists general edits to an existing task (priority, sprint
    /// association, soft-delete marker).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] when the task does not exist.
    async fn update_task(&self, task: &Task) -> StoreResult<()>;

    /// Writes the task's new column assignment and modification timestamp
    /// as a single atomic update keyed by task identifier.
    ///
    /// A column change is never partially applied; concurrent writes for
    /// the same task resolve last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] when the task does not exist.
    async fn assign_column(
        &self,
        id: TaskId,
        column_id: ColumnId,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()>;
}

/// Column persistence and occupancy contract.
#[async_trait]
pub trait ColumnStore: Send + Sync {
    /// Stores a new column.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateColumn`] when the column ID already
    /// exists or [`StoreError::DuplicateOrderIndex`] when another column in
    /// the project holds the same order index.
    async fn insert_column(&self, column: &Column) -> StoreResult<()>;

    /// Finds a column by identifier.
    ///
    /// Returns `None` when the column does not exist.
    async fn find_column(&self, id: ColumnId) -> StoreResult<Option<Column>>;

    /// Returns the project's columns ordered by order index.
    async fn columns_for_project(&self, project_id: ProjectId) -> StoreResult<Vec<Column>>;

    /// Counts the tasks currently occupying a column.
    ///
    /// Soft-deleted tasks are excluded; they no longer consume WIP
    /// capacity.
    async fn count_tasks_in(&self, id: ColumnId) -> StoreResult<u32>;

    /// Deletes a column.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ColumnOccupied`] while any live task occupies
    /// the column, or [`StoreError::ColumnNotFound`] when it does not
    /// exist.
    async fn remove_column(&self, id: ColumnId) -> StoreResult<()>;
}

/// Read and write contract for blocking dependency edges.
#[async_trait]
pub trait DependencyStore: Send + Sync {
    /// Returns whether at least one active dependency edge blocks the
    /// task.
    ///
    /// Callers must treat a failed lookup as "blocked" (fail closed); the
    /// error return makes silent fail-open impossible.
    async fn is_blocked(&self, task_id: TaskId) -> StoreResult<bool>;

    /// Records a dependency edge.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateEdge`] when the edge already exists.
    async fn add_edge(&self, edge: DependencyEdge) -> StoreResult<()>;

    /// Removes a dependency edge; removing an absent edge is a no-op.
    async fn remove_edge(&self, edge: DependencyEdge) -> StoreResult<()>;

    /// Returns the edges blocking the given task.
    async fn edges_for(&self, task_id: TaskId) -> StoreResult<Vec<DependencyEdge>>;
}

/// Sprint lookup contract.
#[async_trait]
pub trait SprintStore: Send + Sync {
    /// Stores a new sprint record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateSprint`] when the sprint ID already
    /// exists.
    async fn insert_sprint(&self, sprint: &Sprint) -> StoreResult<()>;

    /// Finds a sprint by identifier.
    ///
    /// Returns `None` when the sprint does not exist.
    async fn find_sprint(&self, id: SprintId) -> StoreResult<Option<Sprint>>;
}

/// Errors returned by board store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A column with the same identifier already exists.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),

    /// Another column in the project already holds this order index.
    #[error("order index {index} already used in project {project}")]
    DuplicateOrderIndex {
        /// Project owning the colliding columns.
        project: ProjectId,
        /// Colliding order index.
        index: u32,
    },

    /// The dependency edge already exists.
    #[error("dependency edge already exists: {task} blocked by {blocked_by}")]
    DuplicateEdge {
        /// Blocked task.
        task: TaskId,
        /// Blocking task.
        blocked_by: TaskId,
    },

    /// A sprint with the same identifier already exists.
    #[error("duplicate sprint identifier: {0}")]
    DuplicateSprint(SprintId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The column was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The column still holds live tasks and cannot be deleted.
    #[error("column {0} still holds tasks and cannot be deleted")]
    ColumnOccupied(ColumnId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
