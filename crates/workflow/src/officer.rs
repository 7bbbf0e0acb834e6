//! Investigating-officer eligibility
//!
//! Both rules must hold: fiscal-law training within the last three calendar
//! years, and organizational independence from the violating unit. The rules
//! are pure functions of (candidate, organization, today) so they are checked
//! once at selection and again at the moment of appointment.

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Training must fall within this many months of "today" (three calendar years)
pub const TRAINING_CURRENCY_MONTHS: u32 = 36;

/// Candidate or appointed investigating officer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestigatingOfficer {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub organization: String,
    pub fiscal_law_training_date: NaiveDate,
    /// Set only by a successful appointment
    pub date_appointed: Option<DateTime<Utc>>,
}

impl InvestigatingOfficer {
    pub fn candidate(
        id: impl Into<String>,
        name: impl Into<String>,
        rank: impl Into<String>,
        organization: impl Into<String>,
        fiscal_law_training_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rank: rank.into(),
            organization: organization.into(),
            fiscal_law_training_date,
            date_appointed: None,
        }
    }
}

/// A named, human-readable reason a candidate fails eligibility
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityFailure {
    #[error(
        "Fiscal-law training dated {trained} is older than three years \
         (earliest acceptable date is {cutoff})"
    )]
    TrainingExpired { trained: NaiveDate, cutoff: NaiveDate },

    #[error(
        "Candidate belongs to {organization}, the organization under investigation; \
         an investigating officer must be independent"
    )]
    NotIndependent { organization: String },
}

/// Outcome of an eligibility check: eligible iff `reasons` is empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub reasons: Vec<EligibilityFailure>,
}

/// Check a candidate against both eligibility rules as of `today`, with the
/// default training-currency window.
pub fn check_eligibility(
    candidate: &InvestigatingOfficer,
    violation_org: &str,
    today: NaiveDate,
) -> EligibilityReport {
    check_eligibility_as_of(candidate, violation_org, today, TRAINING_CURRENCY_MONTHS)
}

/// Check a candidate with an explicit training-currency window in months.
///
/// Failures accumulate: a candidate failing both training currency and
/// independence reports both reasons.
pub fn check_eligibility_as_of(
    candidate: &InvestigatingOfficer,
    violation_org: &str,
    today: NaiveDate,
    currency_months: u32,
) -> EligibilityReport {
    let mut reasons = Vec::new();

    // Whole calendar months, not an average-day approximation, so the
    // boundary lands on the same calendar date three years earlier.
    let cutoff = today
        .checked_sub_months(Months::new(currency_months))
        .unwrap_or(NaiveDate::MIN);
    if candidate.fiscal_law_training_date < cutoff {
        reasons.push(EligibilityFailure::TrainingExpired {
            trained: candidate.fiscal_law_training_date,
            cutoff,
        });
    }

    if candidate.organization == violation_org {
        reasons.push(EligibilityFailure::NotIndependent {
            organization: candidate.organization.clone(),
        });
    }

    EligibilityReport {
        eligible: reasons.is_empty(),
        reasons,
    }
}
