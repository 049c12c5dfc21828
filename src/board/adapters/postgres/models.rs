//! Diesel row models for board persistence.

use super::schema::{board_columns, dependency_edges, sprints, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Column the task currently occupies.
    pub column_id: uuid::Uuid,
    /// Task priority.
    pub priority: String,
    /// Optional sprint association.
    pub sprint_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Column the task currently occupies.
    pub column_id: uuid::Uuid,
    /// Task priority.
    pub priority: String,
    /// Optional sprint association.
    pub sprint_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Query result row for column records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Order index within the project.
    pub order_index: i32,
    /// Optional WIP capacity.
    pub wip_limit: Option<i32>,
}

/// Insert model for column records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_columns)]
pub struct NewColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Order index within the project.
    pub order_index: i32,
    /// Optional WIP capacity.
    pub wip_limit: Option<i32>,
}

/// Row model for dependency edges; the full row is the primary key.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = dependency_edges)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DependencyEdgeRow {
    /// Blocked task.
    pub task_id: uuid::Uuid,
    /// Blocking task.
    pub blocked_by: uuid::Uuid,
}

/// Row model for sprint records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SprintRow {
    /// Sprint identifier.
    pub id: uuid::Uuid,
    /// Owning project identifier.
    pub project_id: uuid::Uuid,
    /// Sprint status.
    pub status: String,
}
