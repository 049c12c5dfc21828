//! Port contracts for board persistence and observability.
//!
//! Ports define infrastructure-agnostic interfaces used by the transition
//! engine and the planning service.

pub mod audit;
pub mod store;

pub use audit::{AuditError, AuditSink, TransitionRecord};
pub use store::{
    ColumnStore, DependencyStore, SprintStore, StoreError, StoreResult, TaskStore,
};
