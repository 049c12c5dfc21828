//! Aalto: project-management board core.
//!
//! This crate implements the Kanban task transition engine: moving a task
//! between workflow columns under cross-cutting business constraints
//! (blocking dependencies, WIP capacity, sprint lock state, role-based
//! overrides), and reconciling an optimistically updated client view with
//! the authoritative server decision.
//!
//! # Architecture
//!
//! Aalto follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, sinks, etc.)
//!
//! # Modules
//!
//! - [`board`]: Task, column, dependency, and sprint domain plus storage
//!   ports and adapters
//! - [`transition`]: Server-side transition validation and execution
//! - [`client`]: Client-side optimistic board state reconciliation

pub mod board;
pub mod client;
pub mod transition;
