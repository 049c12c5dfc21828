//! Individual transition rule implementations.
//!
//! Each rule is a pure function over state snapshots fetched by the
//! validator. Rules return `Ok(())` when they pass or the specific
//! [`TransitionError`] denial when they fail; they perform no I/O.

use crate::board::domain::{ActorRole, Column, SprintStatus};
use crate::transition::error::TransitionError;

/// Denies the move while any active dependency edge blocks the task.
///
/// The force flag is deliberately absent from this signature: blocking is
/// never overridable.
///
/// # Errors
///
/// Returns [`TransitionError::Blocked`] when the task is blocked.
pub const fn deny_if_blocked(blocked: bool) -> Result<(), TransitionError> {
    if blocked {
        return Err(TransitionError::Blocked);
    }
    Ok(())
}

/// Denies the move when the task's sprint has been completed.
///
/// Tasks without a sprint association pass trivially (the caller passes
/// `None`).
///
/// # Errors
///
/// Returns [`TransitionError::SprintLocked`] when the sprint is closed.
pub fn deny_if_sprint_locked(status: Option<SprintStatus>) -> Result<(), TransitionError> {
    if status.is_some_and(SprintStatus::locks_transitions) {
        return Err(TransitionError::SprintLocked);
    }
    Ok(())
}

/// Returns whether the WIP check is skipped entirely for this caller.
///
/// Only the combination of the force flag and a role with the override
/// capability bypasses WIP; force alone does nothing for other roles.
#[must_use]
pub const fn wip_bypass_applies(role: ActorRole, force: bool) -> bool {
    force && role.can_force_override()
}

/// Denies the move when the destination column is at its WIP capacity.
///
/// Occupancy is evaluated before the incoming task is added, so a column
/// holding exactly `limit` tasks rejects the move.
///
/// # Errors
///
/// Returns [`TransitionError::WipExceeded`] when the column is full.
pub fn deny_if_wip_exceeded(destination: &Column, occupancy: u32) -> Result<(), TransitionError> {
    let Some(limit) = destination.wip_limit() else {
        return Ok(());
    };
    if limit.is_full_at(occupancy) {
        return Err(TransitionError::WipExceeded {
            column: destination.name().as_str().to_owned(),
            limit: limit.value(),
            occupancy,
        });
    }
    Ok(())
}
