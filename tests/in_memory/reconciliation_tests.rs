//! Client round trips: optimistic moves reconciled against server verdicts.

use aalto::board::{
    adapters::memory::{InMemoryBoardStore, RecordingAuditSink},
    domain::Task,
    ports::TaskStore,
    services::CreateTaskRequest,
};
use aalto::client::{
    BoardStateManager, BoardView, LocalTransitionGateway, Reconciliation, submit_with_deadline,
};
use aalto::transition::{TransitionError, TransitionExecutor};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

use super::helpers::{SeededBoard, admin, member, seeded_board};

const WINDOW: Duration = Duration::from_secs(5);

fn gateway(
    board: &SeededBoard,
) -> LocalTransitionGateway<InMemoryBoardStore, RecordingAuditSink, DefaultClock> {
    LocalTransitionGateway::new(TransitionExecutor::new(
        Arc::clone(&board.store),
        Arc::clone(&board.audit),
        Arc::new(DefaultClock),
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn committed_move_leaves_client_and_server_agreeing() -> eyre::Result<()> {
    let clock = DefaultClock;
    let board = seeded_board().await?;
    let task = board
        .planning
        .create_task(CreateTaskRequest::new(board.project, "Agreeable"))
        .await?;

    let view = BoardView::new(
        board.planning.columns(board.project).await?,
        vec![task.clone()],
    );
    let mut manager = BoardStateManager::new(board.project, view);
    let gateway = gateway(&board);

    manager.begin_drag(task.id())?;
    let request = manager
        .drop_on(task.id(), board.doing.id(), member(), false, &clock)?
        .ok_or_else(|| eyre::eyre!("a cross-column drop issues a request"))?;

    let verdict = submit_with_deadline(&gateway, request, WINDOW).await;
    let outcome = manager.reconcile(task.id(), verdict.map(|_| ()), &clock)?;
    ensure!(outcome == Reconciliation::Committed);

    let client_column = manager.view().task(task.id()).map(Task::column_id);
    let server_column = board
        .store
        .find_task(task.id())
        .await?
        .map(|stored| stored.column_id());
    ensure!(client_column == Some(board.doing.id()));
    ensure!(server_column == Some(board.doing.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn denied_move_appears_briefly_then_snaps_back() -> eyre::Result<()> {
    let clock = DefaultClock;
    let board = seeded_board().await?;
    let blocker = board
        .planning
        .create_task(CreateTaskRequest::new(board.project, "Blocker"))
        .await?;
    let task = board
        .planning
        .create_task(CreateTaskRequest::new(board.project, "Blocked"))
        .await?;
    board
        .planning
        .add_dependency(&admin(), task.id(), blocker.id())
        .await?;

    let view = BoardView::new(
        board.planning.columns(board.project).await?,
        vec![blocker, task.clone()],
    );
    let mut manager = BoardStateManager::new(board.project, view);
    let gateway = gateway(&board);

    manager.begin_drag(task.id())?;
    let request = manager
        .drop_on(task.id(), board.done.id(), member(), false, &clock)?
        .ok_or_else(|| eyre::eyre!("a cross-column drop issues a request"))?;

    // The optimistic mutation is visible before the verdict arrives.
    let optimistic = manager.view().task(task.id()).map(Task::column_id);
    ensure!(optimistic == Some(board.done.id()));

    let verdict = submit_with_deadline(&gateway, request, WINDOW).await;
    let outcome = manager.reconcile(task.id(), verdict.map(|_| ()), &clock)?;

    let Reconciliation::RolledBack { reason, notice } = outcome else {
        eyre::bail!("a blocked task must roll back");
    };
    ensure!(reason == TransitionError::Blocked);
    ensure!(!notice.retry_hint);

    // Client and server agree again: the task never left its column.
    let client_column = manager.view().task(task.id()).map(Task::column_id);
    let server_column = board
        .store
        .find_task(task.id())
        .await?
        .map(|stored| stored.column_id());
    ensure!(client_column == Some(task.column_id()));
    ensure!(server_column == Some(task.column_id()));
    ensure!(manager.is_draggable(task.id()));
    Ok(())
}
