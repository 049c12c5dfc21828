//! Decision pipeline tests: rule outcomes, ordering, and fail-closed
//! behaviour.

use crate::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{
        Actor, ActorId, ActorRole, Column, ColumnId, ColumnName, DependencyEdge, Priority,
        ProjectId, Sprint, SprintId, SprintStatus, Task, TaskId, WipLimit,
    },
    ports::{
        ColumnStore, DependencyStore, SprintStore, StoreError, StoreResult, TaskStore,
    },
};
use crate::transition::{TransitionError, TransitionValidator};
use async_trait::async_trait;
use eyre::ensure;
use mockable::{Clock, DefaultClock};
use mockall::mock;
use rstest::{fixture, rstest};
use std::sync::Arc;

mock! {
    ValidationStore {}

    #[async_trait]
    impl DependencyStore for ValidationStore {
        async fn is_blocked(&self, task_id: TaskId) -> StoreResult<bool>;
        async fn add_edge(&self, edge: DependencyEdge) -> StoreResult<()>;
        async fn remove_edge(&self, edge: DependencyEdge) -> StoreResult<()>;
        async fn edges_for(&self, task_id: TaskId) -> StoreResult<Vec<DependencyEdge>>;
    }

    #[async_trait]
    impl SprintStore for ValidationStore {
        async fn insert_sprint(&self, sprint: &Sprint) -> StoreResult<()>;
        async fn find_sprint(&self, id: SprintId) -> StoreResult<Option<Sprint>>;
    }

    #[async_trait]
    impl ColumnStore for ValidationStore {
        async fn insert_column(&self, column: &Column) -> StoreResult<()>;
        async fn find_column(&self, id: ColumnId) -> StoreResult<Option<Column>>;
        async fn columns_for_project(&self, project_id: ProjectId) -> StoreResult<Vec<Column>>;
        async fn count_tasks_in(&self, id: ColumnId) -> StoreResult<u32>;
        async fn remove_column(&self, id: ColumnId) -> StoreResult<()>;
    }
}

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn actor(role: ActorRole) -> Actor {
    Actor::new(ActorId::new(), role)
}

fn limited_column(project: ProjectId, limit: u32) -> Column {
    Column::new(
        project,
        ColumnName::new("Doing").expect("valid name"),
        1,
        Some(WipLimit::new(limit).expect("valid limit")),
    )
}

fn open_column(project: ProjectId) -> Column {
    Column::new(project, ColumnName::new("Done").expect("valid name"), 2, None)
}

fn task(project: ProjectId, column_id: ColumnId, clock: &impl Clock) -> Task {
    Task::new(project, "Subject", column_id, Priority::default(), clock).expect("valid task")
}

/// Fills a column with live occupant tasks.
async fn occupy(
    store: &InMemoryBoardStore,
    project: ProjectId,
    column_id: ColumnId,
    count: u32,
    clock: &impl Clock,
) -> eyre::Result<()> {
    for index in 0..count {
        let occupant = Task::new(
            project,
            format!("Occupant {index}"),
            column_id,
            Priority::default(),
            clock,
        )?;
        store.insert_task(&occupant).await?;
    }
    Ok(())
}

#[rstest]
#[case(ActorRole::Member, false)]
#[case(ActorRole::Admin, true)]
#[tokio::test(flavor = "multi_thread")]
async fn blocked_task_denied_regardless_of_force(
    clock: DefaultClock,
    #[case] role: ActorRole,
    #[case] force: bool,
) -> eyre::Result<()> {
    let store = Arc::new(InMemoryBoardStore::new());
    let project = ProjectId::new();
    let subject = task(project, ColumnId::new(), &clock);
    store.insert_task(&subject).await?;
    store
        .add_edge(DependencyEdge::new(subject.id(), TaskId::new())?)
        .await?;

    let validator = TransitionValidator::new(Arc::clone(&store));
    let verdict = validator
        .validate(&subject, &open_column(project), &actor(role), force)
        .await;

    ensure!(verdict == Err(TransitionError::Blocked));
    Ok(())
}

#[rstest]
#[case(SprintStatus::Planned, Ok(()))]
#[case(SprintStatus::Active, Ok(()))]
#[case(SprintStatus::Completed, Err(TransitionError::SprintLocked))]
#[tokio::test(flavor = "multi_thread")]
async fn sprint_lock_applies_only_to_completed_sprints(
    clock: DefaultClock,
    #[case] status: SprintStatus,
    #[case] expected: Result<(), TransitionError>,
) -> eyre::Result<()> {
    let store = Arc::new(InMemoryBoardStore::new());
    let project = ProjectId::new();
    let sprint = Sprint::new(project, status);
    store.insert_sprint(&sprint).await?;

    let mut subject = task(project, ColumnId::new(), &clock);
    subject.assign_sprint(sprint.id(), &clock)?;

    let validator = TransitionValidator::new(Arc::clone(&store));
    let verdict = validator
        .validate(&subject, &open_column(project), &actor(ActorRole::Admin), true)
        .await;

    ensure!(verdict == expected);
    Ok(())
}

#[rstest]
#[case(1, Ok(()))]
#[case(2, Err(TransitionError::WipExceeded {
    column: "Doing".to_owned(),
    limit: 2,
    occupancy: 2,
}))]
#[tokio::test(flavor = "multi_thread")]
async fn wip_boundary_rejects_exactly_at_capacity(
    clock: DefaultClock,
    #[case] occupancy: u32,
    #[case] expected: Result<(), TransitionError>,
) -> eyre::Result<()> {
    let store = Arc::new(InMemoryBoardStore::new());
    let project = ProjectId::new();
    let destination = limited_column(project, 2);
    store.insert_column(&destination).await?;
    occupy(&store, project, destination.id(), occupancy, &clock).await?;

    let subject = task(project, ColumnId::new(), &clock);
    let validator = TransitionValidator::new(Arc::clone(&store));
    let verdict = validator
        .validate(&subject, &destination, &actor(ActorRole::Member), false)
        .await;

    ensure!(verdict == expected);
    Ok(())
}

#[rstest]
#[case(ActorRole::Admin, true, true)]
#[case(ActorRole::Admin, false, false)]
#[case(ActorRole::Member, true, false)]
#[case(ActorRole::Associate, true, false)]
#[tokio::test(flavor = "multi_thread")]
async fn wip_override_requires_force_and_the_admin_role(
    clock: DefaultClock,
    #[case] role: ActorRole,
    #[case] force: bool,
    #[case] allowed: bool,
) -> eyre::Result<()> {
    let store = Arc::new(InMemoryBoardStore::new());
    let project = ProjectId::new();
    let destination = limited_column(project, 1);
    store.insert_column(&destination).await?;
    occupy(&store, project, destination.id(), 1, &clock).await?;

    let subject = task(project, ColumnId::new(), &clock);
    let validator = TransitionValidator::new(Arc::clone(&store));
    let verdict = validator
        .validate(&subject, &destination, &actor(role), force)
        .await;

    ensure!(verdict.is_ok() == allowed);
    if !allowed {
        ensure!(matches!(verdict, Err(TransitionError::WipExceeded { .. })));
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn soft_deleted_occupants_free_wip_capacity(clock: DefaultClock) -> eyre::Result<()> {
    let store = Arc::new(InMemoryBoardStore::new());
    let project = ProjectId::new();
    let destination = limited_column(project, 1);
    store.insert_column(&destination).await?;

    let mut occupant = task(project, destination.id(), &clock);
    occupant.soft_delete(&clock)?;
    store.insert_task(&occupant).await?;

    let subject = task(project, ColumnId::new(), &clock);
    let validator = TransitionValidator::new(Arc::clone(&store));
    let verdict = validator
        .validate(&subject, &destination, &actor(ActorRole::Member), false)
        .await;

    ensure!(verdict.is_ok());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blocked_wins_over_every_later_check(clock: DefaultClock) -> eyre::Result<()> {
    let store = Arc::new(InMemoryBoardStore::new());
    let project = ProjectId::new();
    // Completed sprint and a full destination at the same time.
    let sprint = Sprint::new(project, SprintStatus::Completed);
    store.insert_sprint(&sprint).await?;
    let destination = limited_column(project, 1);
    store.insert_column(&destination).await?;
    occupy(&store, project, destination.id(), 1, &clock).await?;

    let mut subject = task(project, ColumnId::new(), &clock);
    subject.assign_sprint(sprint.id(), &clock)?;
    store.insert_task(&subject).await?;
    store
        .add_edge(DependencyEdge::new(subject.id(), TaskId::new())?)
        .await?;

    let validator = TransitionValidator::new(Arc::clone(&store));
    let verdict = validator
        .validate(&subject, &destination, &actor(ActorRole::Member), false)
        .await;

    // Dependency outranks both the sprint lock and the WIP limit.
    ensure!(verdict == Err(TransitionError::Blocked));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sprint_lock_wins_over_the_wip_check(clock: DefaultClock) -> eyre::Result<()> {
    let store = Arc::new(InMemoryBoardStore::new());
    let project = ProjectId::new();
    let sprint = Sprint::new(project, SprintStatus::Completed);
    store.insert_sprint(&sprint).await?;
    let destination = limited_column(project, 1);
    store.insert_column(&destination).await?;
    occupy(&store, project, destination.id(), 1, &clock).await?;

    let mut subject = task(project, ColumnId::new(), &clock);
    subject.assign_sprint(sprint.id(), &clock)?;

    let validator = TransitionValidator::new(Arc::clone(&store));
    let verdict = validator
        .validate(&subject, &destination, &actor(ActorRole::Member), false)
        .await;

    ensure!(verdict == Err(TransitionError::SprintLocked));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dangling_sprint_reference_denies_as_system_error(
    clock: DefaultClock,
) -> eyre::Result<()> {
    let store = Arc::new(InMemoryBoardStore::new());
    let project = ProjectId::new();

    let mut subject = task(project, ColumnId::new(), &clock);
    subject.assign_sprint(SprintId::new(), &clock)?;

    let validator = TransitionValidator::new(Arc::clone(&store));
    let verdict = validator
        .validate(&subject, &open_column(project), &actor(ActorRole::Admin), false)
        .await;

    ensure!(matches!(verdict, Err(TransitionError::System(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dependency_lookup_failure_fails_closed(clock: DefaultClock) -> eyre::Result<()> {
    let mut store = MockValidationStore::new();
    store.expect_is_blocked().returning(|_| {
        Err(StoreError::persistence(std::io::Error::other(
            "dependency index unavailable",
        )))
    });

    let project = ProjectId::new();
    let subject = task(project, ColumnId::new(), &clock);
    let validator = TransitionValidator::new(Arc::new(store));
    let verdict = validator
        .validate(&subject, &open_column(project), &actor(ActorRole::Admin), false)
        .await;

    ensure!(matches!(verdict, Err(TransitionError::System(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn occupancy_lookup_failure_fails_closed(clock: DefaultClock) -> eyre::Result<()> {
    let mut store = MockValidationStore::new();
    store.expect_is_blocked().returning(|_| Ok(false));
    store.expect_count_tasks_in().returning(|_| {
        Err(StoreError::persistence(std::io::Error::other(
            "occupancy query failed",
        )))
    });

    let project = ProjectId::new();
    let subject = task(project, ColumnId::new(), &clock);
    let validator = TransitionValidator::new(Arc::new(store));
    let verdict = validator
        .validate(
            &subject,
            &limited_column(project, 3),
            &actor(ActorRole::Member),
            false,
        )
        .await;

    ensure!(matches!(verdict, Err(TransitionError::System(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unlimited_column_skips_the_occupancy_query(clock: DefaultClock) -> eyre::Result<()> {
    let mut store = MockValidationStore::new();
    store.expect_is_blocked().returning(|_| Ok(false));
    // No count_tasks_in expectation: the mock panics if it is queried.

    let project = ProjectId::new();
    let subject = task(project, ColumnId::new(), &clock);
    let validator = TransitionValidator::new(Arc::new(store));
    let verdict = validator
        .validate(&subject, &open_column(project), &actor(ActorRole::Member), false)
        .await;

    ensure!(verdict.is_ok());
    Ok(())
}
