//! Board domain for Aalto.
//!
//! Models the persistent shape of a project board: tasks, ordered workflow
//! columns with optional WIP capacity, blocking dependency edges, sprints,
//! and the actor roles permitted to act on them. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
