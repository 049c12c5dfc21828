//! Best-effort audit sink for committed transitions.

use crate::board::domain::{ActorId, ColumnId, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Activity record describing one committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Actor who moved the task.
    pub actor: ActorId,
    /// Task that moved.
    pub task: TaskId,
    /// Column the task left.
    pub old_column: ColumnId,
    /// Column the task entered.
    pub new_column: ColumnId,
    /// When the transition was committed.
    pub occurred_at: DateTime<Utc>,
}

/// Errors returned by audit sink implementations.
#[derive(Debug, Clone, Error)]
pub enum AuditError {
    /// The sink rejected or failed to persist the record.
    #[error("audit sink failure: {0}")]
    Sink(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuditError {
    /// Wraps a sink failure.
    pub fn sink(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Sink(Arc::new(err))
    }
}

/// Fire-and-forget activity sink.
///
/// Emission is observability, not correctness: a failure to record must
/// never fail the transition that produced the record.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Records a committed transition.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when the record cannot be persisted; callers
    /// swallow this.
    async fn record(&self, record: TransitionRecord) -> Result<(), AuditError>;
}
