//! FundCtl Audit - append-only audit trail
//!
//! Every mutation to a fund control node, violation or investigation is
//! recorded as a timestamped, attributed `AuditRecord`. Records are
//! append-only: there is no update or delete path, consistent with
//! audit-integrity requirements for a funds-control case file.

pub mod error;
pub mod ledger;
pub mod log;
pub mod record;

pub use error::AuditError;
pub use ledger::AuditLedger;
pub use log::AuditLog;
pub use record::AuditRecord;
