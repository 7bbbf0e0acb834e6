//! Audit error types

use thiserror::Error;

/// Errors from the audit trail
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for audit operations
pub type AuditResult<T> = Result<T, AuditError>;
