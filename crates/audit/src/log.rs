//! In-memory append-only audit log

use crate::record::AuditRecord;
use chrono::{DateTime, Utc};

/// Append-only in-memory list of audit records.
///
/// Records append in commit order; queries return chronological slices.
/// There is deliberately no removal path.
#[derive(Debug, Default)]
pub struct AuditLog {
    records: Vec<AuditRecord>,
}

impl AuditLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record built from the given parts, returning a reference to it
    pub fn append(
        &mut self,
        entity_id: impl Into<String>,
        actor: impl Into<String>,
        action: impl Into<String>,
        detail: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> &AuditRecord {
        let record = AuditRecord::new(entity_id, actor, action, detail, timestamp);
        tracing::debug!(id = %record.id, entity = %record.entity_id, action = %record.action, "audit record appended");
        self.records.push(record);
        self.records.last().expect("just pushed")
    }

    /// All records, in commit order
    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    /// Records for one entity, in commit order
    pub fn for_entity(&self, entity_id: &str) -> Vec<&AuditRecord> {
        self.records
            .iter()
            .filter(|r| r.entity_id == entity_id)
            .collect()
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
