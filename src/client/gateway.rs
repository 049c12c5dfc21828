//! Remote boundary between the board state manager and the executor.

use crate::board::ports::{AuditSink, ColumnStore, DependencyStore, SprintStore, TaskStore};
use crate::transition::{
    TransitionError, TransitionExecutor, TransitionReceipt, TransitionRequest,
};
use async_trait::async_trait;
use mockable::Clock;
use std::time::Duration;

/// Request/response boundary the client submits transitions over.
///
/// Once a request is sent it cannot be cancelled; the caller awaits the
/// verdict and reconciles it. Implementations wrap an in-process executor
/// or a network transport.
#[async_trait]
pub trait TransitionGateway: Send + Sync {
    /// Submits a proposed transition and returns the authoritative
    /// verdict.
    ///
    /// # Errors
    ///
    /// Returns the denial exactly as the server decided it.
    async fn propose(
        &self,
        request: TransitionRequest,
    ) -> Result<TransitionReceipt, TransitionError>;
}

/// Gateway that calls an in-process [`TransitionExecutor`] directly.
#[derive(Clone)]
pub struct LocalTransitionGateway<S, A, C>
where
    S: TaskStore + ColumnStore + DependencyStore + SprintStore,
    A: AuditSink,
    C: Clock + Send + Sync,
{
    executor: TransitionExecutor<S, A, C>,
}

impl<S, A, C> LocalTransitionGateway<S, A, C>
where
    S: TaskStore + ColumnStore + DependencyStore + SprintStore,
    A: AuditSink,
    C: Clock + Send + Sync,
{
    /// Creates a gateway over an executor.
    #[must_use]
    pub const fn new(executor: TransitionExecutor<S, A, C>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl<S, A, C> TransitionGateway for LocalTransitionGateway<S, A, C>
where
    S: TaskStore + ColumnStore + DependencyStore + SprintStore,
    A: AuditSink,
    C: Clock + Send + Sync,
{
    async fn propose(
        &self,
        request: TransitionRequest,
    ) -> Result<TransitionReceipt, TransitionError> {
        self.executor.propose_transition(request).await
    }
}

/// Submits a transition with a bounded resolution window.
///
/// A request that does not resolve within the window is treated
/// identically to a system-error denial, so the caller rolls back instead
/// of leaving the task optimistically moved indefinitely.
///
/// # Errors
///
/// Returns the gateway's verdict, or [`TransitionError::System`] when the
/// window elapses first.
pub async fn submit_with_deadline(
    gateway: &dyn TransitionGateway,
    request: TransitionRequest,
    window: Duration,
) -> Result<TransitionReceipt, TransitionError> {
    match tokio::time::timeout(window, gateway.propose(request)).await {
        Ok(verdict) => verdict,
        Err(_elapsed) => Err(TransitionError::system(
            "transition request timed out awaiting the server verdict",
        )),
    }
}
