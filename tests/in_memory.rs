//! In-memory integration tests for the transition engine.
//!
//! Tests are organized into modules by functionality:
//! - `board_flow_tests`: Server-side transition flows over a seeded board
//! - `reconciliation_tests`: Client round trips, optimistic moves, rollback

mod in_memory {
    pub mod helpers;

    mod board_flow_tests;
    mod reconciliation_tests;
}
