//! Ordered transition decision pipeline.

use crate::board::{
    domain::{Actor, Column, Task},
    ports::{ColumnStore, DependencyStore, SprintStore},
};
use crate::transition::{checks, error::TransitionError};
use std::sync::Arc;

/// Decides whether a proposed transition is allowed.
///
/// Checks are evaluated in strict order and the first failing check wins:
///
/// 1. Dependency check — unconditional, never overridable by force.
/// 2. Sprint lock check — likewise absolute.
/// 3. WIP check — skipped when force is set and the role carries the
///    override capability; requires the extra occupancy query, so it runs
///    last.
///
/// The validator owns no persisted state; it is a decision function over
/// snapshots read through the store ports. Any store failure during a
/// lookup denies the move with a [`TransitionError::System`] reason — fail
/// closed, never fail open.
#[derive(Clone)]
pub struct TransitionValidator<S>
where
    S: DependencyStore + SprintStore + ColumnStore,
{
    store: Arc<S>,
}

impl<S> TransitionValidator<S>
where
    S: DependencyStore + SprintStore + ColumnStore,
{
    /// Creates a validator over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns `Ok(())` when the move is allowed, or the first failing
    /// check's denial.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::Blocked`], [`TransitionError::SprintLocked`],
    /// [`TransitionError::WipExceeded`], or [`TransitionError::System`].
    pub async fn validate(
        &self,
        task: &Task,
        destination: &Column,
        actor: &Actor,
        force: bool,
    ) -> Result<(), TransitionError> {
        let blocked = self
            .store
            .is_blocked(task.id())
            .await
            .map_err(TransitionError::system)?;
        checks::deny_if_blocked(blocked)?;

        let sprint_status = match task.sprint_id() {
            Some(sprint_id) => {
                let sprint = self
                    .store
                    .find_sprint(sprint_id)
                    .await
                    .map_err(TransitionError::system)?
                    // A dangling sprint reference is an integrity failure,
                    // not a pass.
                    .ok_or_else(|| {
                        TransitionError::system(format!("sprint {sprint_id} missing"))
                    })?;
                Some(sprint.status())
            }
            None => None,
        };
        checks::deny_if_sprint_locked(sprint_status)?;

        if checks::wip_bypass_applies(actor.role(), force) || destination.wip_limit().is_none() {
            return Ok(());
        }
        let occupancy = self
            .store
            .count_tasks_in(destination.id())
            .await
            .map_err(TransitionError::system)?;
        checks::deny_if_wip_exceeded(destination, occupancy)
    }
}
