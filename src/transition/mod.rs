//! Server-side task transition engine.
//!
//! Given a proposed move of a task into a destination column, the engine
//! evaluates the board's business constraints in strict order (blocking
//! dependencies, sprint lock, WIP capacity), returns a single authoritative
//! verdict, and on acceptance persists the new column assignment atomically
//! and emits a best-effort audit record.
//!
//! - Rule predicates in [`checks`]
//! - The ordered decision pipeline in [`validator`]
//! - Orchestration and persistence in [`executor`]
//! - The denial taxonomy in [`error`]

pub mod checks;
pub mod error;
pub mod executor;
pub mod validator;

pub use error::{MissingEntity, TransitionError};
pub use executor::{TransitionExecutor, TransitionReceipt, TransitionRequest};
pub use validator::TransitionValidator;

#[cfg(test)]
mod tests;
