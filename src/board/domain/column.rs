//! Workflow column aggregate and validated column scalars.

use super::{BoardDomainError, ColumnId, ProjectId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, non-empty column display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnName(String);

impl ColumnName {
    /// Creates a validated column name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnName`] if the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(BoardDomainError::EmptyColumnName);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the column name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ColumnName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positive work-in-progress capacity for a column.
///
/// An absent limit means the column is unbounded. A limit of `N` means the
/// column may hold at most `N` tasks; a column already holding `N` tasks
/// cannot receive another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WipLimit(u32);

impl WipLimit {
    /// Creates a validated WIP limit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ZeroWipLimit`] when the value is zero.
    pub const fn new(value: u32) -> Result<Self, BoardDomainError> {
        if value == 0 {
            return Err(BoardDomainError::ZeroWipLimit);
        }
        Ok(Self(value))
    }

    /// Returns the underlying capacity.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns whether a column at the given occupancy is full.
    ///
    /// The check is `occupancy >= limit`: a column at exactly its limit
    /// cannot receive more tasks.
    #[must_use]
    pub const fn is_full_at(self, occupancy: u32) -> bool {
        occupancy >= self.0
    }
}

impl fmt::Display for WipLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered workflow stage within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    project_id: ProjectId,
    name: ColumnName,
    order_index: u32,
    wip_limit: Option<WipLimit>,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedColumnData {
    /// Persisted column identifier.
    pub id: ColumnId,
    /// Owning project identifier.
    pub project_id: ProjectId,
    /// Persisted display name.
    pub name: ColumnName,
    /// Persisted order index, unique within the project.
    pub order_index: u32,
    /// Persisted WIP limit, if configured.
    pub wip_limit: Option<WipLimit>,
}

impl Column {
    /// Creates a new column for a project.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: ColumnName,
        order_index: u32,
        wip_limit: Option<WipLimit>,
    ) -> Self {
        Self {
            id: ColumnId::new(),
            project_id,
            name,
            order_index,
            wip_limit,
        }
    }

    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            order_index: data.order_index,
            wip_limit: data.wip_limit,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the column display name.
    #[must_use]
    pub const fn name(&self) -> &ColumnName {
        &self.name
    }

    /// Returns the order index within the project.
    #[must_use]
    pub const fn order_index(&self) -> u32 {
        self.order_index
    }

    /// Returns the WIP limit, if one is configured.
    #[must_use]
    pub const fn wip_limit(&self) -> Option<WipLimit> {
        self.wip_limit
    }
}
