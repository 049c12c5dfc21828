//! `PostgreSQL` store implementation for board persistence.

use super::{
    models::{ColumnRow, DependencyEdgeRow, NewColumnRow, NewTaskRow, SprintRow, TaskRow},
    schema::{board_columns, dependency_edges, sprints, tasks},
};
use crate::board::{
    domain::{
        Column, ColumnId, ColumnName, DependencyEdge, PersistedColumnData, PersistedTaskData,
        Priority, ProjectId, Sprint, SprintId, SprintStatus, Task, TaskId, WipLimit,
    },
    ports::{ColumnStore, DependencyStore, SprintStore, StoreError, StoreResult, TaskStore},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed board store.
#[derive(Debug, Clone)]
pub struct PostgresBoardStore {
    pool: BoardPgPool,
}

impl PostgresBoardStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresBoardStore {
    async fn insert_task(&self, task: &Task) -> StoreResult<()> {
        let task_id = task.id();
        let new_row = task_to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StoreError::DuplicateTask(task_id)
                    }
                    _ => StoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(StoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> StoreResult<()> {
        let task_id = task.id();
        let row = task_to_new_row(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set((
                    tasks::title.eq(row.title),
                    tasks::column_id.eq(row.column_id),
                    tasks::priority.eq(row.priority),
                    tasks::sprint_id.eq(row.sprint_id),
                    tasks::updated_at.eq(row.updated_at),
                    tasks::deleted_at.eq(row.deleted_at),
                ))
                .execute(connection)
                .map_err(StoreError::persistence)?;
            if updated == 0 {
                return Err(StoreError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn assign_column(
        &self,
        id: TaskId,
        column_id: ColumnId,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        self.run_blocking(move |connection| {
            // One UPDATE keyed by task id: the column and timestamp land in
            // the same statement, last write wins.
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set((
                    tasks::column_id.eq(column_id.into_inner()),
                    tasks::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(StoreError::persistence)?;
            if updated == 0 {
                return Err(StoreError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ColumnStore for PostgresBoardStore {
    async fn insert_column(&self, column: &Column) -> StoreResult<()> {
        let column_id = column.id();
        let project_id = column.project_id();
        let order_index = column.order_index();
        let new_row = column_to_new_row(column)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(board_columns::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_order_index_unique_violation(info.as_ref()) =>
                    {
                        StoreError::DuplicateOrderIndex {
                            project: project_id,
                            index: order_index,
                        }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StoreError::DuplicateColumn(column_id)
                    }
                    _ => StoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_column(&self, id: ColumnId) -> StoreResult<Option<Column>> {
        self.run_blocking(move |connection| {
            let row = board_columns::table
                .filter(board_columns::id.eq(id.into_inner()))
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()
                .map_err(StoreError::persistence)?;
            row.map(row_to_column).transpose()
        })
        .await
    }

    async fn columns_for_project(&self, project_id: ProjectId) -> StoreResult<Vec<Column>> {
        self.run_blocking(move |connection| {
            let rows = board_columns::table
                .filter(board_columns::project_id.eq(project_id.into_inner()))
                .order(board_columns::order_index.asc())
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)
                .map_err(StoreError::persistence)?;
            rows.into_iter().map(row_to_column).collect()
        })
        .await
    }

    async fn count_tasks_in(&self, id: ColumnId) -> StoreResult<u32> {
        self.run_blocking(move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::column_id.eq(id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .count()
                .get_result(connection)
                .map_err(StoreError::persistence)?;
            u32::try_from(count).map_err(StoreError::persistence)
        })
        .await
    }

    async fn remove_column(&self, id: ColumnId) -> StoreResult<()> {
        self.run_blocking(move |connection| {
            // Occupancy pre-check for semantic error reporting; the
            // foreign-key constraint on tasks.column_id still protects the
            // TOCTOU window between check and delete.
            let occupancy: i64 = tasks::table
                .filter(tasks::column_id.eq(id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .count()
                .get_result(connection)
                .map_err(StoreError::persistence)?;
            if occupancy > 0 {
                return Err(StoreError::ColumnOccupied(id));
            }

            let deleted =
                diesel::delete(board_columns::table.filter(board_columns::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(StoreError::persistence)?;
            if deleted == 0 {
                return Err(StoreError::ColumnNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl DependencyStore for PostgresBoardStore {
    async fn is_blocked(&self, task_id: TaskId) -> StoreResult<bool> {
        self.run_blocking(move |connection| {
            let blocking_edges: i64 = dependency_edges::table
                .filter(dependency_edges::task_id.eq(task_id.into_inner()))
                .count()
                .get_result(connection)
                .map_err(StoreError::persistence)?;
            Ok(blocking_edges > 0)
        })
        .await
    }

    async fn add_edge(&self, edge: DependencyEdge) -> StoreResult<()> {
        let row = DependencyEdgeRow {
            task_id: edge.task_id().into_inner(),
            blocked_by: edge.blocked_by().into_inner(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(dependency_edges::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StoreError::DuplicateEdge {
                            task: edge.task_id(),
                            blocked_by: edge.blocked_by(),
                        }
                    }
                    _ => StoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn remove_edge(&self, edge: DependencyEdge) -> StoreResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(
                dependency_edges::table
                    .filter(dependency_edges::task_id.eq(edge.task_id().into_inner()))
                    .filter(dependency_edges::blocked_by.eq(edge.blocked_by().into_inner())),
            )
            .execute(connection)
            .map_err(StoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn edges_for(&self, task_id: TaskId) -> StoreResult<Vec<DependencyEdge>> {
        self.run_blocking(move |connection| {
            let rows = dependency_edges::table
                .filter(dependency_edges::task_id.eq(task_id.into_inner()))
                .select(DependencyEdgeRow::as_select())
                .load::<DependencyEdgeRow>(connection)
                .map_err(StoreError::persistence)?;
            rows.into_iter().map(row_to_edge).collect()
        })
        .await
    }
}

#[async_trait]
impl SprintStore for PostgresBoardStore {
    async fn insert_sprint(&self, sprint: &Sprint) -> StoreResult<()> {
        let sprint_id = sprint.id();
        let row = SprintRow {
            id: sprint.id().into_inner(),
            project_id: sprint.project_id().into_inner(),
            status: sprint.status().as_str().to_owned(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(sprints::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StoreError::DuplicateSprint(sprint_id)
                    }
                    _ => StoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_sprint(&self, id: SprintId) -> StoreResult<Option<Sprint>> {
        self.run_blocking(move |connection| {
            let row = sprints::table
                .filter(sprints::id.eq(id.into_inner()))
                .select(SprintRow::as_select())
                .first::<SprintRow>(connection)
                .optional()
                .map_err(StoreError::persistence)?;
            row.map(row_to_sprint).transpose()
        })
        .await
    }
}

fn task_to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().to_owned(),
        column_id: task.column_id().into_inner(),
        priority: task.priority().as_str().to_owned(),
        sprint_id: task.sprint_id().map(SprintId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        deleted_at: task.deleted_at(),
    }
}

fn row_to_task(row: TaskRow) -> StoreResult<Task> {
    let priority =
        Priority::try_from(row.priority.as_str()).map_err(StoreError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        title: row.title,
        column_id: ColumnId::from_uuid(row.column_id),
        priority,
        sprint_id: row.sprint_id.map(SprintId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    };
    Ok(Task::from_persisted(data))
}

fn column_to_new_row(column: &Column) -> StoreResult<NewColumnRow> {
    let order_index = i32::try_from(column.order_index()).map_err(StoreError::persistence)?;
    let wip_limit = column
        .wip_limit()
        .map(|limit| i32::try_from(limit.value()).map_err(StoreError::persistence))
        .transpose()?;

    Ok(NewColumnRow {
        id: column.id().into_inner(),
        project_id: column.project_id().into_inner(),
        name: column.name().as_str().to_owned(),
        order_index,
        wip_limit,
    })
}

fn row_to_column(row: ColumnRow) -> StoreResult<Column> {
    let name = ColumnName::new(row.name).map_err(StoreError::persistence)?;
    let order_index = u32::try_from(row.order_index).map_err(StoreError::persistence)?;
    let wip_limit = row
        .wip_limit
        .map(|limit| {
            u32::try_from(limit)
                .map_err(StoreError::persistence)
                .and_then(|value| WipLimit::new(value).map_err(StoreError::persistence))
        })
        .transpose()?;

    Ok(Column::from_persisted(PersistedColumnData {
        id: ColumnId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        name,
        order_index,
        wip_limit,
    }))
}

fn row_to_edge(row: DependencyEdgeRow) -> StoreResult<DependencyEdge> {
    DependencyEdge::new(
        TaskId::from_uuid(row.task_id),
        TaskId::from_uuid(row.blocked_by),
    )
    .map_err(StoreError::persistence)
}

fn row_to_sprint(row: SprintRow) -> StoreResult<Sprint> {
    let status = SprintStatus::try_from(row.status.as_str()).map_err(StoreError::persistence)?;
    Ok(Sprint::from_persisted(
        SprintId::from_uuid(row.id),
        ProjectId::from_uuid(row.project_id),
        status,
    ))
}

fn is_order_index_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_board_columns_project_order_unique")
}
