//! Workflow error types
//!
//! Every failure is a business-rule rejection, returned synchronously to the
//! caller and never retried. Messages carry the specific missing criterion
//! or the statutory context so a compliance reviewer can verify them
//! independently.

use thiserror::Error;

use crate::investigation::InvestigationStage;
use crate::officer::EligibilityFailure;
use crate::violation::ViolationStatus;

/// Errors from the violation and investigation workflow
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Violation not found: {0}")]
    ViolationNotFound(String),

    #[error("Investigation not found: {0}")]
    InvestigationNotFound(String),

    /// Appointment failed closed; one entry per failed eligibility rule
    #[error("Candidate {candidate} is ineligible: {}", reasons.iter().map(|r| r.to_string()).collect::<Vec<_>>().join("; "))]
    Ineligible {
        candidate: String,
        reasons: Vec<EligibilityFailure>,
    },

    /// Investigations are 1:1 with violations
    #[error("Violation {0} already has an investigation")]
    InvestigationExists(String),

    #[error("Violation {id} is in terminal status {status} and cannot advance")]
    TerminalStatus { id: String, status: ViolationStatus },

    #[error("Investigation {id} is at terminal stage {stage} and cannot advance")]
    TerminalStage {
        id: String,
        stage: InvestigationStage,
    },

    /// Case files of closed violations are read-only
    #[error("Violation {0} is closed; its case file cannot be modified")]
    CaseClosed(String),

    /// Every status or stage transition must carry a justification
    #[error("Justification is mandatory when advancing {0}")]
    MissingJustification(String),

    #[error("No responsible party named {name} on investigation {investigation}")]
    PartyNotFound {
        investigation: String,
        name: String,
    },
}
