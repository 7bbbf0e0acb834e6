//! ADA violations and their status machine
//!
//! A violation records a suspected or confirmed breach of a statutory
//! funds-control limitation. Status advances one step at a time through a
//! fixed chain; violations are never deleted.

use chrono::NaiveDate;
use fundctl_core::Amount;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The six statutory grounds for an Antideficiency Act violation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationType {
    /// Obligation or expenditure in excess of available authority
    AmountLimitation,
    /// Obligation in advance of an appropriation
    AdvanceOfAppropriation,
    /// Acceptance of voluntary services
    VoluntaryServices,
    /// Breach of an administrative subdivision of funds
    AdministrativeControlLimitation,
    /// Funds applied to an unauthorized purpose
    PurposeStatute,
    /// Funds obligated outside their period of availability
    TimeLimitation,
}

impl ViolationType {
    /// Statutory citation backing this violation type
    pub fn citation(&self) -> &'static str {
        match self {
            ViolationType::AmountLimitation => "31 U.S.C. \u{a7} 1341(a)(1)(A)",
            ViolationType::AdvanceOfAppropriation => "31 U.S.C. \u{a7} 1341(a)(1)(B)",
            ViolationType::VoluntaryServices => "31 U.S.C. \u{a7} 1342",
            ViolationType::AdministrativeControlLimitation => "31 U.S.C. \u{a7} 1517(a)",
            ViolationType::PurposeStatute => "31 U.S.C. \u{a7} 1301(a)",
            ViolationType::TimeLimitation => "31 U.S.C. \u{a7} 1502(a)",
        }
    }
}

/// Violation case status, advanced strictly one step at a time
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationStatus {
    Suspected,
    PreliminaryReview,
    FormalInvestigation,
    Reported,
    ClosedNoViolation,
}

impl ViolationStatus {
    /// The single legal successor status, `None` when terminal
    pub fn next(&self) -> Option<ViolationStatus> {
        match self {
            ViolationStatus::Suspected => Some(ViolationStatus::PreliminaryReview),
            ViolationStatus::PreliminaryReview => Some(ViolationStatus::FormalInvestigation),
            ViolationStatus::FormalInvestigation => Some(ViolationStatus::Reported),
            ViolationStatus::Reported => Some(ViolationStatus::ClosedNoViolation),
            ViolationStatus::ClosedNoViolation => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

/// A suspected or confirmed breach of a statutory funds-control limitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Unique identifier (`VIO-XXXXXXXX`)
    pub id: String,
    pub status: ViolationStatus,
    pub violation_type: ViolationType,
    pub discovery_date: NaiveDate,
    pub amount: Amount,
    /// Organization in which the breach occurred
    pub organization: String,
    pub description: String,
}

/// Intake attributes for opening a new violation case
#[derive(Debug, Clone)]
pub struct ViolationDraft {
    pub violation_type: ViolationType,
    pub discovery_date: NaiveDate,
    pub amount: Amount,
    pub organization: String,
    pub description: String,
}

impl ViolationDraft {
    pub fn new(
        violation_type: ViolationType,
        discovery_date: NaiveDate,
        amount: Amount,
        organization: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            discovery_date,
            amount,
            organization: organization.into(),
            description: description.into(),
        }
    }
}
