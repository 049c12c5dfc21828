//! Thread-safe in-memory board store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Column, ColumnId, DependencyEdge, ProjectId, Sprint, SprintId, Task, TaskId},
    ports::{ColumnStore, DependencyStore, SprintStore, StoreError, StoreResult, TaskStore},
};

/// In-memory implementation of all four board store ports over a single
/// lock, so cross-store reads observe a consistent snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<BoardState>>,
}

#[derive(Debug, Default)]
struct BoardState {
    tasks: HashMap<TaskId, Task>,
    columns: HashMap<ColumnId, Column>,
    edges: HashSet<DependencyEdge>,
    sprints: HashMap<SprintId, Sprint>,
}

impl BoardState {
    fn live_occupancy(&self, column_id: ColumnId) -> u32 {
        let count = self
            .tasks
            .values()
            .filter(|task| task.column_id() == column_id && !task.is_deleted())
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

impl InMemoryBoardStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, BoardState>> {
        self.state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, BoardState>> {
        self.state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl TaskStore for InMemoryBoardStore {
    async fn insert_task(&self, task: &Task) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(StoreError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn update_task(&self, task: &Task) -> StoreResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(StoreError::TaskNotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn assign_column(
        &self,
        id: TaskId,
        column_id: ColumnId,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(StoreError::TaskNotFound(id))?;
        // Single mutation under the write lock: column and timestamp land
        // together, last write wins.
        task.apply_column_assignment(column_id, updated_at);
        Ok(())
    }
}

#[async_trait]
impl ColumnStore for InMemoryBoardStore {
    async fn insert_column(&self, column: &Column) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.columns.contains_key(&column.id()) {
            return Err(StoreError::DuplicateColumn(column.id()));
        }
        let collision = state.columns.values().any(|existing| {
            existing.project_id() == column.project_id()
                && existing.order_index() == column.order_index()
        });
        if collision {
            return Err(StoreError::DuplicateOrderIndex {
                project: column.project_id(),
                index: column.order_index(),
            });
        }
        state.columns.insert(column.id(), column.clone());
        Ok(())
    }

    async fn find_column(&self, id: ColumnId) -> StoreResult<Option<Column>> {
        let state = self.read()?;
        Ok(state.columns.get(&id).cloned())
    }

    async fn columns_for_project(&self, project_id: ProjectId) -> StoreResult<Vec<Column>> {
        let state = self.read()?;
        let mut columns: Vec<Column> = state
            .columns
            .values()
            .filter(|column| column.project_id() == project_id)
            .cloned()
            .collect();
        columns.sort_by_key(Column::order_index);
        Ok(columns)
    }

    async fn count_tasks_in(&self, id: ColumnId) -> StoreResult<u32> {
        let state = self.read()?;
        Ok(state.live_occupancy(id))
    }

    async fn remove_column(&self, id: ColumnId) -> StoreResult<()> {
        let mut state = self.write()?;
        if !state.columns.contains_key(&id) {
            return Err(StoreError::ColumnNotFound(id));
        }
        if state.live_occupancy(id) > 0 {
            return Err(StoreError::ColumnOccupied(id));
        }
        state.columns.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl DependencyStore for InMemoryBoardStore {
    async fn is_blocked(&self, task_id: TaskId) -> StoreResult<bool> {
        let state = self.read()?;
        Ok(state.edges.iter().any(|edge| edge.task_id() == task_id))
    }

    async fn add_edge(&self, edge: DependencyEdge) -> StoreResult<()> {
        let mut state = self.write()?;
        if !state.edges.insert(edge) {
            return Err(StoreError::DuplicateEdge {
                task: edge.task_id(),
                blocked_by: edge.blocked_by(),
            });
        }
        Ok(())
    }

    async fn remove_edge(&self, edge: DependencyEdge) -> StoreResult<()> {
        let mut state = self.write()?;
        state.edges.remove(&edge);
        Ok(())
    }

    async fn edges_for(&self, task_id: TaskId) -> StoreResult<Vec<DependencyEdge>> {
        let state = self.read()?;
        Ok(state
            .edges
            .iter()
            .filter(|edge| edge.task_id() == task_id)
            .copied()
            .collect())
    }
}

#[async_trait]
impl SprintStore for InMemoryBoardStore {
    async fn insert_sprint(&self, sprint: &Sprint) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.sprints.contains_key(&sprint.id()) {
            return Err(StoreError::DuplicateSprint(sprint.id()));
        }
        state.sprints.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn find_sprint(&self, id: SprintId) -> StoreResult<Option<Sprint>> {
        let state = self.read()?;
        Ok(state.sprints.get(&id).cloned())
    }
}
