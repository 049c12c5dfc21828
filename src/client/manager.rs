//! Board state manager: optimistic moves and reconciliation.

use crate::board::domain::{Actor, ColumnId, ProjectId, Task, TaskId};
use crate::client::{
    drag::{DragError, DragPhase},
    view::BoardView,
};
use crate::transition::{TransitionError, TransitionRequest};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use std::collections::HashMap;

/// How long a rollback notice stays visible before auto-dismissing.
const NOTICE_TTL_SECONDS: i64 = 4;

/// Transient, auto-dismissing notice surfaced after a rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short, specific, human-readable denial reason.
    pub message: String,
    /// When the notice was posted.
    pub posted_at: DateTime<Utc>,
    /// When the notice disappears, acknowledged or not.
    pub expires_at: DateTime<Utc>,
    /// Whether suggesting a retry is appropriate (system errors only).
    pub retry_hint: bool,
}

/// Outcome of reconciling one transition verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The server allowed the move; the snapshot was discarded.
    Committed,
    /// The server denied the move; the view was rolled back to the
    /// retained snapshot and a notice posted.
    RolledBack {
        /// The denial returned by the server.
        reason: TransitionError,
        /// The notice surfaced to the user.
        notice: Notice,
    },
}

#[derive(Debug)]
struct DragState {
    phase: DragPhase,
    snapshot: Option<Task>,
}

/// Client-side owner of the board layout.
///
/// Applies optimistic moves immediately, retains the pre-move snapshot,
/// and guarantees the board never diverges from server truth for longer
/// than one round trip: an ALLOW commits, any DENY (including timeout
/// mapped to a system error) rolls back within the same render cycle.
///
/// The manager itself is synchronous; the remote call lives behind
/// [`crate::client::TransitionGateway`], keeping the UI interactive while
/// a transition is in flight. Only per-task exclusivity is enforced:
/// concurrent transitions on different tasks are independent.
#[derive(Debug)]
pub struct BoardStateManager {
    project_id: ProjectId,
    view: BoardView,
    read_only: bool,
    drags: HashMap<TaskId, DragState>,
    notices: Vec<Notice>,
}

impl BoardStateManager {
    /// Creates a manager over a freshly fetched view.
    #[must_use]
    pub fn new(project_id: ProjectId, view: BoardView) -> Self {
        Self {
            project_id,
            view,
            read_only: false,
            drags: HashMap::new(),
            notices: Vec::new(),
        }
    }

    /// Flags the board read-only (e.g. a public share view): the dragging
    /// transition is disabled entirely, so no optimistic mutation or
    /// remote call can ever be issued.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Returns the current render collection.
    #[must_use]
    pub const fn view(&self) -> &BoardView {
        &self.view
    }

    /// Returns the drag phase for a task.
    #[must_use]
    pub fn phase_of(&self, task_id: TaskId) -> DragPhase {
        self.drags
            .get(&task_id)
            .map_or(DragPhase::Idle, |state| state.phase)
    }

    /// Returns whether a drag may start on the task right now.
    #[must_use]
    pub fn is_draggable(&self, task_id: TaskId) -> bool {
        !self.read_only
            && self.view.task(task_id).is_some()
            && self.phase_of(task_id) == DragPhase::Idle
    }

    /// Starts a drag on pointer-down. No state is mutated yet.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::ReadOnly`] on a read-only board,
    /// [`DragError::UnknownTask`] when the task is not in the view, or
    /// [`DragError::MoveInFlight`] while a previous request for the task
    /// is unresolved.
    pub fn begin_drag(&mut self, task_id: TaskId) -> Result<(), DragError> {
        if self.read_only {
            return Err(DragError::ReadOnly);
        }
        if self.view.task(task_id).is_none() {
            return Err(DragError::UnknownTask(task_id));
        }
        match self.phase_of(task_id) {
            DragPhase::Idle => {}
            DragPhase::Dragging => return Err(DragError::AlreadyDragging(task_id)),
            DragPhase::OptimisticallyMoved => return Err(DragError::MoveInFlight(task_id)),
        }
        self.drags.insert(
            task_id,
            DragState {
                phase: DragPhase::Dragging,
                snapshot: None,
            },
        );
        Ok(())
    }

    /// Abandons a drag without mutating the view.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] unless the task is in the
    /// `Dragging` phase.
    pub fn cancel_drag(&mut self, task_id: TaskId) -> Result<(), DragError> {
        if self.phase_of(task_id) != DragPhase::Dragging {
            return Err(DragError::NotDragging(task_id));
        }
        self.drags.remove(&task_id);
        Ok(())
    }

    /// Completes a drop: mutates the task's column in the view
    /// immediately, retains the pre-move snapshot, and returns the request
    /// to submit to the server.
    ///
    /// Dropping a task back onto its current column cancels the drag and
    /// returns `Ok(None)`; no request is issued.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] unless a drag is active, or
    /// [`DragError::UnknownColumn`] when the target is not in the view.
    pub fn drop_on(
        &mut self,
        task_id: TaskId,
        destination: ColumnId,
        actor: Actor,
        force: bool,
        clock: &impl Clock,
    ) -> Result<Option<TransitionRequest>, DragError> {
        if self.phase_of(task_id) != DragPhase::Dragging {
            return Err(DragError::NotDragging(task_id));
        }
        if self.view.column(destination).is_none() {
            return Err(DragError::UnknownColumn(destination));
        }
        let current_column = self
            .view
            .task(task_id)
            .map(Task::column_id)
            .ok_or(DragError::UnknownTask(task_id))?;
        if current_column == destination {
            self.drags.remove(&task_id);
            return Ok(None);
        }

        let snapshot = self
            .view
            .apply_move(task_id, destination, clock)
            .ok_or(DragError::UnknownTask(task_id))?;
        self.drags.insert(
            task_id,
            DragState {
                phase: DragPhase::OptimisticallyMoved,
                snapshot: Some(snapshot),
            },
        );

        let mut request =
            TransitionRequest::new(task_id, destination, self.project_id, actor);
        if force {
            request = request.with_force();
        }
        Ok(Some(request))
    }

    /// Reconciles the server verdict for an optimistically moved task.
    ///
    /// On ALLOW the snapshot is discarded; on any DENY the task's column
    /// is restored from the snapshot and a transient notice is posted.
    /// Either way the task returns to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NothingInFlight`] unless the task is in the
    /// `OptimisticallyMoved` phase.
    pub fn reconcile(
        &mut self,
        task_id: TaskId,
        verdict: Result<(), TransitionError>,
        clock: &impl Clock,
    ) -> Result<Reconciliation, DragError> {
        // Peek before removing: a spurious reconcile must not cancel an
        // active drag.
        let in_flight = self
            .drags
            .get(&task_id)
            .is_some_and(|state| state.phase == DragPhase::OptimisticallyMoved);
        if !in_flight {
            return Err(DragError::NothingInFlight(task_id));
        }
        let snapshot = self
            .drags
            .remove(&task_id)
            .and_then(|state| state.snapshot)
            .ok_or(DragError::NothingInFlight(task_id))?;

        match verdict {
            Ok(()) => Ok(Reconciliation::Committed),
            Err(reason) => {
                self.view.restore(snapshot);
                let notice = self.post_notice(&reason, clock);
                Ok(Reconciliation::RolledBack { reason, notice })
            }
        }
    }

    /// Returns the notices still visible at the current time, pruning
    /// expired ones first. Notices disappear after a fixed window even if
    /// un-acknowledged.
    pub fn active_notices(&mut self, clock: &impl Clock) -> &[Notice] {
        let now = clock.utc();
        self.notices.retain(|notice| notice.expires_at > now);
        &self.notices
    }

    fn post_notice(&mut self, reason: &TransitionError, clock: &impl Clock) -> Notice {
        let posted_at = clock.utc();
        let notice = Notice {
            message: reason.to_string(),
            posted_at,
            expires_at: posted_at + Duration::seconds(NOTICE_TTL_SECONDS),
            retry_hint: reason.is_retryable(),
        };
        self.notices.push(notice.clone());
        notice
    }
}
