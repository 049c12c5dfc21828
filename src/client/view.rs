//! Render collection for the client board.

use crate::board::domain::{Column, ColumnId, Task, TaskId};
use std::collections::HashMap;

/// Explicit, immutable-per-render task/column collection.
///
/// The view is owned by the board state manager and mutated only through
/// its drag state machine, never in place from multiple call sites.
/// Soft-deleted tasks are filtered out at construction; they are not
/// rendered and cannot be dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    columns: Vec<Column>,
    tasks: HashMap<TaskId, Task>,
}

impl BoardView {
    /// Builds a view from server state, ordering columns by order index
    /// and dropping soft-deleted tasks.
    #[must_use]
    pub fn new(mut columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        columns.sort_by_key(Column::order_index);
        let tasks = tasks
            .into_iter()
            .filter(|task| !task.is_deleted())
            .map(|task| (task.id(), task))
            .collect();
        Self { columns, tasks }
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns a column by identifier.
    #[must_use]
    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id() == id)
    }

    /// Returns a task by identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Returns the tasks currently shown in a column.
    #[must_use]
    pub fn tasks_in(&self, column_id: ColumnId) -> Vec<&Task> {
        self.tasks
            .values()
            .filter(|task| task.column_id() == column_id)
            .collect()
    }

    /// Applies the optimistic column mutation for a task and returns the
    /// pre-move snapshot to retain for rollback.
    pub(crate) fn apply_move(
        &mut self,
        id: TaskId,
        destination: ColumnId,
        clock: &impl mockable::Clock,
    ) -> Option<Task> {
        let task = self.tasks.get_mut(&id)?;
        let snapshot = task.clone();
        task.move_to_column(destination, clock);
        Some(snapshot)
    }

    /// Restores a task from a retained snapshot, byte for byte.
    pub(crate) fn restore(&mut self, snapshot: Task) {
        self.tasks.insert(snapshot.id(), snapshot);
    }
}
