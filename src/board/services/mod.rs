//! Application services for board structure management.

mod planning;

pub use planning::{
    BoardPlanningError, BoardPlanningResult, BoardPlanningService, CreateColumnRequest,
    CreateTaskRequest,
};
