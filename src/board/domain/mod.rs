//! Domain model for the project board.
//!
//! The board domain models tasks, workflow columns, blocking dependency
//! edges, sprints, and actor roles while keeping all infrastructure
//! concerns outside of the domain boundary.

mod actor;
mod column;
mod dependency;
mod error;
mod ids;
mod sprint;
mod task;

pub use actor::{Actor, ActorRole};
pub use column::{Column, ColumnName, PersistedColumnData, WipLimit};
pub use dependency::DependencyEdge;
pub use error::{
    BoardDomainError, ParseActorRoleError, ParsePriorityError, ParseSprintStatusError,
};
pub use ids::{ActorId, ColumnId, ProjectId, SprintId, TaskId};
pub use sprint::{Sprint, SprintStatus};
pub use task::{PersistedTaskData, Priority, Task};
