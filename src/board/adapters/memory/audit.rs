//! Audit sink adapters.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::ports::{AuditError, AuditSink, TransitionRecord};

/// Audit sink that keeps records in memory for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingAuditSink {
    records: Arc<RwLock<Vec<TransitionRecord>>>,
}

impl RecordingAuditSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the records received so far.
    ///
    /// Returns an empty list if the underlying lock was poisoned.
    #[must_use]
    pub fn records(&self) -> Vec<TransitionRecord> {
        self.records
            .read()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(&self, record: TransitionRecord) -> Result<(), AuditError> {
        let mut records = self
            .records
            .write()
            .map_err(|err| AuditError::sink(std::io::Error::other(err.to_string())))?;
        records.push(record);
        Ok(())
    }
}

/// Audit sink that accepts and drops every record.
///
/// Used where no audit backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardingAuditSink;

#[async_trait]
impl AuditSink for DiscardingAuditSink {
    async fn record(&self, _record: TransitionRecord) -> Result<(), AuditError> {
        Ok(())
    }
}

/// Audit sink that fails every record.
///
/// Test double for verifying that audit failures never fail the
/// transition that produced them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingAuditSink;

#[async_trait]
impl AuditSink for FailingAuditSink {
    async fn record(&self, _record: TransitionRecord) -> Result<(), AuditError> {
        Err(AuditError::sink(std::io::Error::other(
            "audit sink unavailable",
        )))
    }
}
