//! Shared test helpers for in-memory transition integration tests.

use aalto::board::{
    adapters::memory::{InMemoryBoardStore, RecordingAuditSink},
    domain::{Actor, ActorId, ActorRole, Column, ProjectId},
    services::{BoardPlanningService, CreateColumnRequest},
};
use aalto::transition::TransitionExecutor;
use mockable::DefaultClock;
use std::sync::Arc;

/// Everything a flow test needs: the store, both service layers, and the
/// seeded three-column board.
pub struct SeededBoard {
    pub store: Arc<InMemoryBoardStore>,
    pub audit: Arc<RecordingAuditSink>,
    pub planning: BoardPlanningService<InMemoryBoardStore, DefaultClock>,
    pub executor: TransitionExecutor<InMemoryBoardStore, RecordingAuditSink, DefaultClock>,
    pub project: ProjectId,
    pub todo: Column,
    pub doing: Column,
    pub done: Column,
}

/// Provides an admin actor.
pub fn admin() -> Actor {
    Actor::new(ActorId::new(), ActorRole::Admin)
}

/// Provides a regular member actor.
pub fn member() -> Actor {
    Actor::new(ActorId::new(), ActorRole::Member)
}

/// Seeds a board with "To Do", "Doing" (WIP limit 2), and "Done" columns.
///
/// # Errors
///
/// Returns an error if any column creation fails.
pub async fn seeded_board() -> eyre::Result<SeededBoard> {
    let store = Arc::new(InMemoryBoardStore::new());
    let audit = Arc::new(RecordingAuditSink::new());
    let planning = BoardPlanningService::new(Arc::clone(&store), Arc::new(DefaultClock));
    let executor = TransitionExecutor::new(
        Arc::clone(&store),
        Arc::clone(&audit),
        Arc::new(DefaultClock),
    );

    let project = ProjectId::new();
    let owner = admin();
    let todo = planning
        .create_column(&owner, CreateColumnRequest::new(project, "To Do", 0))
        .await?;
    let doing = planning
        .create_column(
            &owner,
            CreateColumnRequest::new(project, "Doing", 1).with_wip_limit(2),
        )
        .await?;
    let done = planning
        .create_column(&owner, CreateColumnRequest::new(project, "Done", 2))
        .await?;

    Ok(SeededBoard {
        store,
        audit,
        planning,
        executor,
        project,
        todo,
        doing,
        done,
    })
}
