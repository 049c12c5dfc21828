//! In-memory adapters for tests and single-process use.

mod audit;
mod board;

pub use audit::{DiscardingAuditSink, FailingAuditSink, RecordingAuditSink};
pub use board::InMemoryBoardStore;
