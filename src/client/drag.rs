//! Per-task drag state machine.

use crate::board::domain::{ColumnId, TaskId};
use thiserror::Error;

/// Phase of a drag operation for one task.
///
/// The full lifecycle is `Idle → Dragging → OptimisticallyMoved`, then
/// either commit or rollback on the server verdict, after which the task
/// returns to `Idle`. Only one in-flight transition per task is permitted;
/// while a task is `OptimisticallyMoved` it is not draggable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No drag activity for the task.
    #[default]
    Idle,
    /// Pointer down on the task; no state mutated yet.
    Dragging,
    /// Dropped on a target; the local view has been mutated and the
    /// pre-move snapshot retained while the server verdict is awaited.
    OptimisticallyMoved,
}

/// Errors rejected at the UI layer before any network call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DragError {
    /// The board is flagged read-only; dragging is disabled entirely.
    #[error("board is read-only")]
    ReadOnly,

    /// The task is not present in the view.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// The drop target column is not present in the view.
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// The task already has an unresolved transition request; it is
    /// temporarily non-draggable.
    #[error("task {0} already has a transition in flight")]
    MoveInFlight(TaskId),

    /// A drag is already active for the task.
    #[error("task {0} is already being dragged")]
    AlreadyDragging(TaskId),

    /// The operation requires the task to be in the `Dragging` phase.
    #[error("task {0} is not being dragged")]
    NotDragging(TaskId),

    /// No transition is awaiting reconciliation for the task.
    #[error("task {0} has no transition awaiting reconciliation")]
    NothingInFlight(TaskId),
}
