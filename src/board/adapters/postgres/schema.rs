//! Diesel schema for board persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project identifier.
        project_id -> Uuid,
        /// Task title.
        #[max_length = 500]
        title -> Varchar,
        /// Column the task currently occupies.
        column_id -> Uuid,
        /// Task priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Optional sprint association.
        sprint_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-delete marker.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Workflow column records.
    board_columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Owning project identifier.
        project_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Order index, unique within the project.
        order_index -> Integer,
        /// Optional WIP capacity.
        wip_limit -> Nullable<Integer>,
    }
}

diesel::table! {
    /// Blocking dependency edges.
    dependency_edges (task_id, blocked_by) {
        /// Blocked task.
        task_id -> Uuid,
        /// Blocking task.
        blocked_by -> Uuid,
    }
}

diesel::table! {
    /// Sprint records.
    sprints (id) {
        /// Sprint identifier.
        id -> Uuid,
        /// Owning project identifier.
        project_id -> Uuid,
        /// Sprint status.
        #[max_length = 20]
        status -> Varchar,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tasks, board_columns, dependency_edges, sprints);
