//! Task aggregate root.

use super::{
    BoardDomainError, ColumnId, ProjectId, SprintId, TaskId, error::ParsePriorityError,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Ordered task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Lowest priority.
    Low,
    /// Default priority.
    Medium,
    /// Elevated priority.
    High,
    /// Highest priority.
    Critical,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
///
/// A task belongs to exactly one column at any instant; its workflow status
/// is derived from column membership rather than stored separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    column_id: ColumnId,
    priority: Priority,
    sprint_id: Option<SprintId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project identifier.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: String,
    /// Column the task currently occupies.
    pub column_id: ColumnId,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted sprint association, if any.
    pub sprint_id: Option<SprintId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker, if the task has been deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task in the given column.
    ///
    /// Callers resolve the column beforehand: either the project's default
    /// column (first by order index) or an explicit target.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        column_id: ColumnId,
        priority: Priority,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let raw_title = title.into();
        let normalized = raw_title.trim();
        if normalized.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            project_id,
            title: normalized.to_owned(),
            column_id,
            priority,
            sprint_id: None,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            column_id: data.column_id,
            priority: data.priority,
            sprint_id: data.sprint_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the column the task currently occupies.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the sprint association, if any.
    #[must_use]
    pub const fn sprint_id(&self) -> Option<SprintId> {
        self.sprint_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-delete timestamp, if the task has been deleted.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns whether the task has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Moves the task into the given column and updates the modification
    /// timestamp.
    ///
    /// Business-rule validation (dependencies, WIP, sprint lock) happens in
    /// the transition engine before this mutation is applied.
    pub fn move_to_column(&mut self, column_id: ColumnId, clock: &impl Clock) {
        self.column_id = column_id;
        self.touch(clock);
    }

    /// Replays an authoritative column assignment with an explicit
    /// timestamp, as written by a store adapter.
    pub const fn apply_column_assignment(
        &mut self,
        column_id: ColumnId,
        updated_at: DateTime<Utc>,
    ) {
        self.column_id = column_id;
        self.updated_at = updated_at;
    }

    /// Changes the task priority.
    pub fn set_priority(&mut self, priority: Priority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Assigns the task to a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::SprintAlreadyAssigned`] if the task is
    /// already part of a sprint.
    pub fn assign_sprint(
        &mut self,
        sprint_id: SprintId,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        if let Some(existing) = self.sprint_id {
            return Err(BoardDomainError::SprintAlreadyAssigned {
                task: self.id,
                sprint: existing,
            });
        }
        self.sprint_id = Some(sprint_id);
        self.touch(clock);
        Ok(())
    }

    /// Marks the task as deleted without physically removing it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskAlreadyDeleted`] if the task is
    /// already marked.
    pub fn soft_delete(&mut self, clock: &impl Clock) -> Result<(), BoardDomainError> {
        if self.deleted_at.is_some() {
            return Err(BoardDomainError::TaskAlreadyDeleted(self.id));
        }
        let timestamp = clock.utc();
        self.deleted_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
