//! Transition orchestration: validate, persist, audit.

use crate::board::{
    domain::{Actor, ColumnId, ProjectId, TaskId},
    ports::{
        AuditSink, ColumnStore, DependencyStore, SprintStore, StoreError, TaskStore,
        TransitionRecord,
    },
};
use crate::transition::{
    error::{MissingEntity, TransitionError},
    validator::TransitionValidator,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Proposed move of a task into a destination column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// Task to move.
    pub task_id: TaskId,
    /// Column the task should enter.
    pub destination: ColumnId,
    /// Project the caller is operating on.
    pub project_id: ProjectId,
    /// Authenticated caller.
    pub actor: Actor,
    /// Requests the policy override; only effective for roles carrying the
    /// override capability.
    pub force: bool,
}

impl TransitionRequest {
    /// Creates a request without the force flag.
    #[must_use]
    pub const fn new(
        task_id: TaskId,
        destination: ColumnId,
        project_id: ProjectId,
        actor: Actor,
    ) -> Self {
        Self {
            task_id,
            destination,
            project_id,
            actor,
            force: false,
        }
    }

    /// Sets the force flag.
    #[must_use]
    pub const fn with_force(mut self) -> Self {
        self.force = true;
        self
    }
}

/// Confirmation of a committed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionReceipt {
    /// Task that moved.
    pub task_id: TaskId,
    /// Column the task left.
    pub from: ColumnId,
    /// Column the task entered.
    pub to: ColumnId,
}

/// Applies accepted transitions to persisted task state.
///
/// The executor invokes the validator, and on ALLOW writes the task's new
/// column assignment and modification timestamp as one atomic update, then
/// emits a fire-and-forget audit record. On DENY the denial is returned
/// unchanged and no persistence side effect occurs.
#[derive(Clone)]
pub struct TransitionExecutor<S, A, C>
where
    S: TaskStore + ColumnStore + DependencyStore + SprintStore,
    A: AuditSink,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    validator: TransitionValidator<S>,
    audit: Arc<A>,
    clock: Arc<C>,
}

impl<S, A, C> TransitionExecutor<S, A, C>
where
    S: TaskStore + ColumnStore + DependencyStore + SprintStore,
    A: AuditSink,
    C: Clock + Send + Sync,
{
    /// Creates a new executor over the given store, audit sink, and clock.
    #[must_use]
    pub fn new(store: Arc<S>, audit: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            validator: TransitionValidator::new(Arc::clone(&store)),
            store,
            audit,
            clock,
        }
    }

    /// Proposes a transition and returns the authoritative verdict.
    ///
    /// # Errors
    ///
    /// Returns exactly one [`TransitionError`] per denied attempt:
    /// [`TransitionError::Unauthorized`] before anything else when the role
    /// may not move tasks, [`TransitionError::NotFound`] for a missing task
    /// or column, a rule denial from the validator, or
    /// [`TransitionError::System`] for infrastructure failures.
    pub async fn propose_transition(
        &self,
        request: TransitionRequest,
    ) -> Result<TransitionReceipt, TransitionError> {
        if !request.actor.role().can_move_tasks() {
            return Err(TransitionError::Unauthorized {
                role: request.actor.role().as_str().to_owned(),
            });
        }

        let task = self
            .store
            .find_task(request.task_id)
            .await
            .map_err(TransitionError::system)?
            .filter(|task| !task.is_deleted() && task.project_id() == request.project_id)
            .ok_or(TransitionError::NotFound(MissingEntity::Task(
                request.task_id,
            )))?;

        let destination = self
            .store
            .find_column(request.destination)
            .await
            .map_err(TransitionError::system)?
            .filter(|column| column.project_id() == request.project_id)
            .ok_or(TransitionError::NotFound(MissingEntity::Column(
                request.destination,
            )))?;

        self.validator
            .validate(&task, &destination, &request.actor, request.force)
            .await?;

        let old_column = task.column_id();
        let committed_at = self.clock.utc();
        self.store
            .assign_column(task.id(), destination.id(), committed_at)
            .await
            .map_err(|err| match err {
                // The task vanished between validation and write.
                StoreError::TaskNotFound(id) => {
                    TransitionError::NotFound(MissingEntity::Task(id))
                }
                other => TransitionError::system(other),
            })?;

        let record = TransitionRecord {
            actor: request.actor.id(),
            task: task.id(),
            old_column,
            new_column: destination.id(),
            occurred_at: committed_at,
        };
        if self.audit.record(record).await.is_err() {
            // Best-effort sink; a failed audit write never vetoes a
            // committed move.
        }

        Ok(TransitionReceipt {
            task_id: task.id(),
            from: old_column,
            to: destination.id(),
        })
    }
}
