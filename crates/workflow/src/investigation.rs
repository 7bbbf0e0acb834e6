//! ADA investigations - the case record tied 1:1 to a violation
//!
//! An investigation exists only after a valid investigating officer has been
//! appointed, so the initial stage is always `IoAppointment`. Stages advance
//! strictly one step at a time; evidence and responsible parties are
//! append-only, consistent with audit-integrity requirements for a
//! compliance case file.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::officer::InvestigatingOfficer;

/// Investigation stage, strictly sequential
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestigationStage {
    IoAppointment,
    EvidenceCollection,
    Analysis,
    RoiGeneration,
    LegalReview,
    FinalSubmission,
}

impl InvestigationStage {
    /// The single legal successor stage, `None` when terminal
    pub fn next(&self) -> Option<InvestigationStage> {
        match self {
            InvestigationStage::IoAppointment => Some(InvestigationStage::EvidenceCollection),
            InvestigationStage::EvidenceCollection => Some(InvestigationStage::Analysis),
            InvestigationStage::Analysis => Some(InvestigationStage::RoiGeneration),
            InvestigationStage::RoiGeneration => Some(InvestigationStage::LegalReview),
            InvestigationStage::LegalReview => Some(InvestigationStage::FinalSubmission),
            InvestigationStage::FinalSubmission => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

/// Review gate status on an investigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    NotStarted,
    InProgress,
    Complete,
}

impl Default for ReviewStatus {
    fn default() -> Self {
        ReviewStatus::NotStarted
    }
}

/// One item of collected evidence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub description: String,
    pub source: String,
    pub date_collected: NaiveDate,
}

/// An individual potentially responsible for the violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsibleParty {
    pub name: String,
    pub position: String,
    /// Due-process flags: the party has answered, and the finding stands
    pub rebuttal_received: bool,
    pub is_confirmed: bool,
}

/// The case record for one violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investigation {
    /// Unique identifier (`INV-XXXXXXXX`)
    pub id: String,
    /// Back-reference to the violation; the case repository owns this record
    pub violation_id: String,
    pub stage: InvestigationStage,
    pub investigating_officer: InvestigatingOfficer,
    pub start_date: DateTime<Utc>,
    /// Deadline for final submission
    pub suspense_date: NaiveDate,
    pub evidence: Vec<EvidenceItem>,
    pub responsible_parties: Vec<ResponsibleParty>,
    pub findings: String,
    pub corrective_actions: String,
    pub legal_review_status: ReviewStatus,
    pub advance_decision_status: ReviewStatus,
}
