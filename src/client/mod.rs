//! Client-side board state management.
//!
//! Holds the in-memory task/column layout, applies optimistic moves
//! immediately on drop, submits the proposed transition to the server, and
//! reconciles the authoritative verdict: commit on ALLOW, rollback to the
//! retained pre-move snapshot plus a transient notice on DENY.
//!
//! - The render collection in [`view`]
//! - The per-drag state machine in [`drag`]
//! - Orchestration and notices in [`manager`]
//! - The remote boundary and timeout policy in [`gateway`]

pub mod drag;
pub mod gateway;
pub mod manager;
pub mod view;

pub use drag::{DragError, DragPhase};
pub use gateway::{LocalTransitionGateway, TransitionGateway, submit_with_deadline};
pub use manager::{BoardStateManager, Notice, Reconciliation};
pub use view::BoardView;

#[cfg(test)]
mod tests;
