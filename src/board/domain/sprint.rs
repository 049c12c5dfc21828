//! Sprint grouping and status.

use super::{ProjectId, SprintId, error::ParseSprintStatusError};
use serde::{Deserialize, Serialize};

/// Sprint lifecycle status.
///
/// At most one sprint per project is `Active` at a time; that invariant is
/// enforced by the persistence layer, not by the transition engine. A task
/// whose sprint is `Completed` is transition-locked regardless of
/// dependency or WIP state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
    /// Sprint has been planned but not started.
    Planned,
    /// Sprint is currently running.
    Active,
    /// Sprint has been closed; its tasks no longer move.
    Completed,
}

impl SprintStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Returns whether tasks assigned to a sprint with this status are
    /// locked against transitions.
    #[must_use]
    pub const fn locks_transitions(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl TryFrom<&str> for SprintStatus {
    type Error = ParseSprintStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "planned" => Ok(Self::Planned),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseSprintStatusError(value.to_owned())),
        }
    }
}

/// Sprint record owned by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    id: SprintId,
    project_id: ProjectId,
    status: SprintStatus,
}

impl Sprint {
    /// Creates a sprint record.
    #[must_use]
    pub fn new(project_id: ProjectId, status: SprintStatus) -> Self {
        Self {
            id: SprintId::new(),
            project_id,
            status,
        }
    }

    /// Reconstructs a sprint from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: SprintId, project_id: ProjectId, status: SprintStatus) -> Self {
        Self {
            id,
            project_id,
            status,
        }
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the sprint status.
    #[must_use]
    pub const fn status(&self) -> SprintStatus {
        self.status
    }
}
