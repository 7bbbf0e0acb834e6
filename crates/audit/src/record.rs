//! Audit records - timestamped, attributed events
//!
//! A record binds an actor, an entity and a free-text detail under a SHA-256
//! content hash, so any later tampering with stored records is detectable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One append-only audit record attached to a mutable entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique record identifier (`AUD-XXXXXXXX`)
    pub id: String,

    /// Identifier of the entity the event belongs to (node, violation, case)
    pub entity_id: String,

    /// Actor identity supplied by the caller for every audited mutation
    pub actor: String,

    /// Short machine-readable action name, e.g. `node_updated`
    pub action: String,

    /// Human-readable detail; carries the justification for edits
    pub detail: String,

    /// SHA-256 over `entity_id|actor|action|detail|timestamp`
    pub content_hash: String,

    /// When the event was committed
    pub timestamp: DateTime<Utc>,
}

impl AuditRecord {
    /// Create a new record, stamping the content hash
    pub fn new(
        entity_id: impl Into<String>,
        actor: impl Into<String>,
        action: impl Into<String>,
        detail: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let entity_id = entity_id.into();
        let actor = actor.into();
        let action = action.into();
        let detail = detail.into();
        let id = format!("AUD-{}", &uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase());
        let content_hash = compute_hash(&entity_id, &actor, &action, &detail, timestamp);

        Self {
            id,
            entity_id,
            actor,
            action,
            detail,
            content_hash,
            timestamp,
        }
    }

    /// Recompute the content hash and compare against the stored one
    pub fn verify(&self) -> bool {
        self.content_hash
            == compute_hash(
                &self.entity_id,
                &self.actor,
                &self.action,
                &self.detail,
                self.timestamp,
            )
    }
}

fn compute_hash(
    entity_id: &str,
    actor: &str,
    action: &str,
    detail: &str,
    timestamp: DateTime<Utc>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(entity_id.as_bytes());
    hasher.update(b"|");
    hasher.update(actor.as_bytes());
    hasher.update(b"|");
    hasher.update(action.as_bytes());
    hasher.update(b"|");
    hasher.update(detail.as_bytes());
    hasher.update(b"|");
    hasher.update(timestamp.to_rfc3339().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = AuditRecord::new(
            "FCN-001",
            "comptroller.a",
            "node_updated",
            "FY25 authority realignment",
            Utc::now(),
        );

        assert!(record.id.starts_with("AUD-"));
        assert_eq!(record.entity_id, "FCN-001");
        assert_eq!(record.content_hash.len(), 64); // SHA256 hex
    }

    #[test]
    fn test_verify_detects_tampering() {
        let mut record = AuditRecord::new(
            "FCN-001",
            "comptroller.a",
            "node_updated",
            "FY25 authority realignment",
            Utc::now(),
        );
        assert!(record.verify());

        record.detail = "altered after the fact".to_string();
        assert!(!record.verify());
    }

    #[test]
    fn test_serde_roundtrip() {
        let record = AuditRecord::new("VIO-001", "counsel.b", "status_changed", "to PRELIMINARY_REVIEW", Utc::now());
        let json = serde_json::to_string(&record).unwrap();
        let parsed: AuditRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
        assert!(parsed.verify());
    }
}
