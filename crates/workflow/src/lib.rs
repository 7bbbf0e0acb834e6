//! FundCtl Workflow - violation and investigation case management
//!
//! State machines over ADA violations and their investigations, with the
//! investigating-officer eligibility rules enforced at appointment time.
//! The `Caseload` repository owns all case records; every mutation is
//! audited with actor and justification.

pub mod caseload;
pub mod error;
pub mod investigation;
pub mod officer;
pub mod violation;

pub use caseload::{Caseload, CaseloadConfig};
pub use error::WorkflowError;
pub use investigation::{
    EvidenceItem, Investigation, InvestigationStage, ResponsibleParty, ReviewStatus,
};
pub use officer::{
    check_eligibility, check_eligibility_as_of, EligibilityFailure, EligibilityReport,
    InvestigatingOfficer, TRAINING_CURRENCY_MONTHS,
};
pub use violation::{Violation, ViolationDraft, ViolationStatus, ViolationType};
