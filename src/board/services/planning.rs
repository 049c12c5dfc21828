//! Service layer for board structure management.
//!
//! Covers the create/read/update glue around the transition engine: task
//! creation into the default or an explicit column, column creation and
//! deletion, dependency edge management, and soft deletion. All operations
//! that restructure the board require a role with the board-management
//! capability.

use crate::board::{
    domain::{
        Actor, BoardDomainError, Column, ColumnId, ColumnName, DependencyEdge, Priority,
        ProjectId, Task, TaskId, WipLimit,
    },
    ports::{ColumnStore, DependencyStore, StoreError, TaskStore},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    column_id: Option<ColumnId>,
    priority: Priority,
}

impl CreateTaskRequest {
    /// Creates a request with required fields; the task lands in the
    /// project's default column (first by order index).
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            column_id: None,
            priority: Priority::default(),
        }
    }

    /// Targets an explicit column instead of the project default.
    #[must_use]
    pub const fn with_column(mut self, column_id: ColumnId) -> Self {
        self.column_id = Some(column_id);
        self
    }

    /// Sets the task priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Request payload for creating a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateColumnRequest {
    project_id: ProjectId,
    name: String,
    order_index: u32,
    wip_limit: Option<u32>,
}

impl CreateColumnRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, name: impl Into<String>, order_index: u32) -> Self {
        Self {
            project_id,
            name: name.into(),
            order_index,
            wip_limit: None,
        }
    }

    /// Sets a WIP capacity for the column.
    #[must_use]
    pub const fn with_wip_limit(mut self, limit: u32) -> Self {
        self.wip_limit = Some(limit);
        self
    }
}

/// Service-level errors for board structure management.
#[derive(Debug, Error)]
pub enum BoardPlanningError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The caller's role lacks the board-management capability.
    #[error("role '{0}' may not restructure the board")]
    Forbidden(String),

    /// The project has no columns, so no default column exists.
    #[error("project {0} has no columns to receive a new task")]
    NoColumns(ProjectId),
}

/// Result type for board planning operations.
pub type BoardPlanningResult<T> = Result<T, BoardPlanningError>;

/// Board structure orchestration service.
#[derive(Clone)]
pub struct BoardPlanningService<S, C>
where
    S: TaskStore + ColumnStore + DependencyStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> BoardPlanningService<S, C>
where
    S: TaskStore + ColumnStore + DependencyStore,
    C: Clock + Send + Sync,
{
    /// Creates a new planning service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a task in the requested column, or in the project's default
    /// column (first by order index) when none is given.
    ///
    /// # Errors
    ///
    /// Returns [`BoardPlanningError`] when the title fails validation, the
    /// target column is unknown, or the project has no columns at all.
    pub async fn create_task(&self, request: CreateTaskRequest) -> BoardPlanningResult<Task> {
        let column_id = match request.column_id {
            Some(column_id) => {
                self.store
                    .find_column(column_id)
                    .await?
                    .ok_or(StoreError::ColumnNotFound(column_id))?;
                column_id
            }
            None => self.default_column(request.project_id).await?,
        };

        let task = Task::new(
            request.project_id,
            request.title,
            column_id,
            request.priority,
            &*self.clock,
        )?;
        self.store.insert_task(&task).await?;
        Ok(task)
    }

    /// Creates a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardPlanningError::Forbidden`] when the actor may not
    /// restructure the board, or a domain/store error otherwise.
    pub async fn create_column(
        &self,
        actor: &Actor,
        request: CreateColumnRequest,
    ) -> BoardPlanningResult<Column> {
        Self::require_board_management(actor)?;

        let name = ColumnName::new(request.name)?;
        let wip_limit = request.wip_limit.map(WipLimit::new).transpose()?;
        let column = Column::new(request.project_id, name, request.order_index, wip_limit);
        self.store.insert_column(&column).await?;
        Ok(column)
    }

    /// Deletes a column; rejected while any live task occupies it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardPlanningError::Forbidden`] for unprivileged actors,
    /// [`StoreError::ColumnOccupied`] while the column holds tasks, or
    /// [`StoreError::ColumnNotFound`] when it does not exist.
    pub async fn delete_column(
        &self,
        actor: &Actor,
        column_id: ColumnId,
    ) -> BoardPlanningResult<()> {
        Self::require_board_management(actor)?;
        self.store.remove_column(column_id).await?;
        Ok(())
    }

    /// Returns the project's columns ordered by order index.
    ///
    /// # Errors
    ///
    /// Returns [`BoardPlanningError::Store`] when the lookup fails.
    pub async fn columns(&self, project_id: ProjectId) -> BoardPlanningResult<Vec<Column>> {
        Ok(self.store.columns_for_project(project_id).await?)
    }

    /// Records a blocking dependency edge.
    ///
    /// # Errors
    ///
    /// Returns [`BoardPlanningError::Forbidden`] for unprivileged actors,
    /// a domain error for self-dependencies, or a store error for
    /// duplicates.
    pub async fn add_dependency(
        &self,
        actor: &Actor,
        task_id: TaskId,
        blocked_by: TaskId,
    ) -> BoardPlanningResult<DependencyEdge> {
        Self::require_board_management(actor)?;
        let edge = DependencyEdge::new(task_id, blocked_by)?;
        self.store.add_edge(edge).await?;
        Ok(edge)
    }

    /// Removes a blocking dependency edge; absent edges are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardPlanningError::Forbidden`] for unprivileged actors or
    /// a store error when the removal fails.
    pub async fn remove_dependency(
        &self,
        actor: &Actor,
        edge: DependencyEdge,
    ) -> BoardPlanningResult<()> {
        Self::require_board_management(actor)?;
        self.store.remove_edge(edge).await?;
        Ok(())
    }

    /// Soft-deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardPlanningError::Forbidden`] for unprivileged actors,
    /// [`StoreError::TaskNotFound`] when the task does not exist, or a
    /// domain error when it is already deleted.
    pub async fn soft_delete_task(&self, actor: &Actor, task_id: TaskId) -> BoardPlanningResult<()> {
        Self::require_board_management(actor)?;
        let mut task = self
            .store
            .find_task(task_id)
            .await?
            .ok_or(StoreError::TaskNotFound(task_id))?;
        task.soft_delete(&*self.clock)?;
        self.store.update_task(&task).await?;
        Ok(())
    }

    async fn default_column(&self, project_id: ProjectId) -> BoardPlanningResult<ColumnId> {
        let columns = self.store.columns_for_project(project_id).await?;
        columns
            .first()
            .map(Column::id)
            .ok_or(BoardPlanningError::NoColumns(project_id))
    }

    fn require_board_management(actor: &Actor) -> BoardPlanningResult<()> {
        if actor.role().can_manage_board() {
            Ok(())
        } else {
            Err(BoardPlanningError::Forbidden(
                actor.role().as_str().to_owned(),
            ))
        }
    }
}
