//! Server-side transition flows over a seeded in-memory board.

use aalto::board::{
    domain::Priority,
    ports::TaskStore,
    services::CreateTaskRequest,
};
use aalto::transition::{TransitionError, TransitionRequest};
use eyre::ensure;
use rstest::rstest;

use super::helpers::{admin, member, seeded_board};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_walks_the_board_and_leaves_an_audit_trail() -> eyre::Result<()> {
    let board = seeded_board().await?;
    let mover = member();
    let task = board
        .planning
        .create_task(CreateTaskRequest::new(board.project, "Walk the board"))
        .await?;
    ensure!(task.column_id() == board.todo.id());

    let first = board
        .executor
        .propose_transition(TransitionRequest::new(
            task.id(),
            board.doing.id(),
            board.project,
            mover,
        ))
        .await?;
    ensure!(first.from == board.todo.id());

    let second = board
        .executor
        .propose_transition(TransitionRequest::new(
            task.id(),
            board.done.id(),
            board.project,
            mover,
        ))
        .await?;
    ensure!(second.from == board.doing.id());
    ensure!(second.to == board.done.id());

    let stored = board
        .store
        .find_task(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    ensure!(stored.column_id() == board.done.id());

    let records = board.audit.records();
    ensure!(records.len() == 2);
    ensure!(records.iter().all(|record| record.task == task.id()));
    ensure!(records.iter().all(|record| record.actor == mover.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_column_rejects_members_but_yields_to_admin_force() -> eyre::Result<()> {
    let board = seeded_board().await?;
    // Fill "Doing" to its limit of 2.
    for title in ["First occupant", "Second occupant"] {
        board
            .planning
            .create_task(
                CreateTaskRequest::new(board.project, title)
                    .with_column(board.doing.id())
                    .with_priority(Priority::High),
            )
            .await?;
    }
    let task = board
        .planning
        .create_task(CreateTaskRequest::new(board.project, "Third"))
        .await?;

    let plain = board
        .executor
        .propose_transition(TransitionRequest::new(
            task.id(),
            board.doing.id(),
            board.project,
            member(),
        ))
        .await;
    ensure!(matches!(
        plain,
        Err(TransitionError::WipExceeded { limit: 2, occupancy: 2, .. })
    ));

    let forced = board
        .executor
        .propose_transition(
            TransitionRequest::new(task.id(), board.doing.id(), board.project, admin())
                .with_force(),
        )
        .await?;
    ensure!(forced.to == board.doing.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_the_blocking_edge_unblocks_the_task() -> eyre::Result<()> {
    let board = seeded_board().await?;
    let owner = admin();
    let blocker = board
        .planning
        .create_task(CreateTaskRequest::new(board.project, "Blocker"))
        .await?;
    let task = board
        .planning
        .create_task(CreateTaskRequest::new(board.project, "Blocked"))
        .await?;
    let edge = board
        .planning
        .add_dependency(&owner, task.id(), blocker.id())
        .await?;

    let request =
        TransitionRequest::new(task.id(), board.doing.id(), board.project, member());
    let denied = board.executor.propose_transition(request).await;
    ensure!(denied == Err(TransitionError::Blocked));

    board.planning.remove_dependency(&owner, edge).await?;
    let receipt = board.executor.propose_transition(request).await?;
    ensure!(receipt.to == board.doing.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn soft_deleted_tasks_are_invisible_to_the_engine() -> eyre::Result<()> {
    let board = seeded_board().await?;
    let owner = admin();
    let task = board
        .planning
        .create_task(CreateTaskRequest::new(board.project, "Ephemeral"))
        .await?;
    board.planning.soft_delete_task(&owner, task.id()).await?;

    let verdict = board
        .executor
        .propose_transition(TransitionRequest::new(
            task.id(),
            board.doing.id(),
            board.project,
            owner,
        ))
        .await;

    ensure!(matches!(verdict, Err(TransitionError::NotFound(_))));
    Ok(())
}
