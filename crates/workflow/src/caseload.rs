//! Case repository over violations and investigations
//!
//! Single-writer, synchronous semantics: every mutation is locate, validate,
//! commit, audit - in that order. Violations and investigations are never
//! deleted; a case ends by reaching a terminal status, and its audit trail
//! stays addressable.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Days;
use fundctl_audit::AuditLog;
use fundctl_core::{Clock, SystemClock};

use crate::error::WorkflowError;
use crate::investigation::{
    EvidenceItem, Investigation, InvestigationStage, ResponsibleParty, ReviewStatus,
};
use crate::officer::{check_eligibility_as_of, InvestigatingOfficer, TRAINING_CURRENCY_MONTHS};
use crate::violation::{Violation, ViolationDraft, ViolationStatus};

/// Tunables for the case repository
#[derive(Debug, Clone)]
pub struct CaseloadConfig {
    /// Training-currency window for investigating officers, in months
    pub training_currency_months: u32,

    /// Days from appointment to the report-of-investigation suspense
    pub suspense_days: u64,
}

impl Default for CaseloadConfig {
    fn default() -> Self {
        Self {
            training_currency_months: TRAINING_CURRENCY_MONTHS,
            suspense_days: 90,
        }
    }
}

/// The violation and investigation case repository
pub struct Caseload {
    violations: HashMap<String, Violation>,
    investigations: HashMap<String, Investigation>,
    /// Violation id to investigation id (1:1)
    case_index: HashMap<String, String>,
    audit: AuditLog,
    clock: Arc<dyn Clock>,
    config: CaseloadConfig,
}

impl Caseload {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_config(clock, CaseloadConfig::default())
    }

    pub fn with_config(clock: Arc<dyn Clock>, config: CaseloadConfig) -> Self {
        Self {
            violations: HashMap::new(),
            investigations: HashMap::new(),
            case_index: HashMap::new(),
            audit: AuditLog::new(),
            clock,
            config,
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn config(&self) -> &CaseloadConfig {
        &self.config
    }

    // === Reads ===

    pub fn violation(&self, id: &str) -> Result<&Violation, WorkflowError> {
        self.violations
            .get(id)
            .ok_or_else(|| WorkflowError::ViolationNotFound(id.to_string()))
    }

    pub fn investigation(&self, id: &str) -> Result<&Investigation, WorkflowError> {
        self.investigations
            .get(id)
            .ok_or_else(|| WorkflowError::InvestigationNotFound(id.to_string()))
    }

    /// The investigation opened for a violation, if one exists
    pub fn investigation_for_violation(&self, violation_id: &str) -> Option<&Investigation> {
        self.case_index
            .get(violation_id)
            .and_then(|id| self.investigations.get(id))
    }

    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.violations.values()
    }

    /// The audit trail for all case mutations
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    // === Violation lifecycle ===

    /// Open a new violation case at status `Suspected`
    pub fn open_violation(&mut self, draft: ViolationDraft, actor: &str) -> String {
        let now = self.clock.now();
        let id = prefixed_id("VIO");
        let violation = Violation {
            id: id.clone(),
            status: ViolationStatus::Suspected,
            violation_type: draft.violation_type,
            discovery_date: draft.discovery_date,
            amount: draft.amount,
            organization: draft.organization,
            description: draft.description,
        };

        tracing::info!(id = %id, vtype = %violation.violation_type, org = %violation.organization, "violation opened");
        let detail = format!(
            "{} ({}) at {}",
            violation.violation_type,
            violation.violation_type.citation(),
            violation.organization
        );
        self.violations.insert(id.clone(), violation);
        self.audit.append(&id, actor, "violation_opened", detail, now);
        id
    }

    /// Advance a violation one status step.
    ///
    /// Transitions are operator-driven, one step at a time, and every one is
    /// audited with actor and justification.
    pub fn advance_violation(
        &mut self,
        id: &str,
        actor: &str,
        justification: &str,
    ) -> Result<ViolationStatus, WorkflowError> {
        if justification.trim().is_empty() {
            return Err(WorkflowError::MissingJustification(id.to_string()));
        }
        let violation = self
            .violations
            .get_mut(id)
            .ok_or_else(|| WorkflowError::ViolationNotFound(id.to_string()))?;
        let next = violation.status.next().ok_or(WorkflowError::TerminalStatus {
            id: id.to_string(),
            status: violation.status,
        })?;

        let prior = violation.status;
        violation.status = next;
        tracing::info!(id = %id, from = %prior, to = %next, "violation status advanced");
        self.audit.append(
            id,
            actor,
            "violation_status_advanced",
            format!("{prior} -> {next}: {justification}"),
            self.clock.now(),
        );
        Ok(next)
    }

    // === Investigation lifecycle ===

    /// Appoint an investigating officer and open the investigation.
    ///
    /// Both eligibility rules are re-validated at the moment of commit, not
    /// just at selection time, and the appointment fails closed with one
    /// reason per failed rule. On success the officer is stamped with
    /// `date_appointed` and the investigation starts at `IoAppointment`;
    /// this is the only path that creates an investigation.
    pub fn appoint_officer(
        &mut self,
        violation_id: &str,
        candidate: InvestigatingOfficer,
        actor: &str,
    ) -> Result<String, WorkflowError> {
        let violation = self.violation(violation_id)?;
        if violation.status.is_terminal() {
            return Err(WorkflowError::CaseClosed(violation_id.to_string()));
        }
        if self.case_index.contains_key(violation_id) {
            return Err(WorkflowError::InvestigationExists(violation_id.to_string()));
        }

        let today = self.clock.today();
        let report = check_eligibility_as_of(
            &candidate,
            &violation.organization,
            today,
            self.config.training_currency_months,
        );
        if !report.eligible {
            tracing::warn!(
                violation = %violation_id,
                candidate = %candidate.id,
                failures = report.reasons.len(),
                "appointment rejected"
            );
            return Err(WorkflowError::Ineligible {
                candidate: candidate.id,
                reasons: report.reasons,
            });
        }

        let now = self.clock.now();
        let mut officer = candidate;
        officer.date_appointed = Some(now);

        let id = prefixed_id("INV");
        let detail = format!("{} ({}) appointed as IO", officer.name, officer.rank);
        let investigation = Investigation {
            id: id.clone(),
            violation_id: violation_id.to_string(),
            stage: InvestigationStage::IoAppointment,
            investigating_officer: officer,
            start_date: now,
            suspense_date: today
                .checked_add_days(Days::new(self.config.suspense_days))
                .unwrap_or(today),
            evidence: Vec::new(),
            responsible_parties: Vec::new(),
            findings: String::new(),
            corrective_actions: String::new(),
            legal_review_status: ReviewStatus::NotStarted,
            advance_decision_status: ReviewStatus::NotStarted,
        };

        tracing::info!(id = %id, violation = %violation_id, "investigation opened");
        self.case_index.insert(violation_id.to_string(), id.clone());
        self.investigations.insert(id.clone(), investigation);
        self.audit.append(&id, actor, "officer_appointed", detail, now);
        Ok(id)
    }

    /// Advance an investigation one stage; no skipping, no concurrency
    pub fn advance_stage(
        &mut self,
        id: &str,
        actor: &str,
        justification: &str,
    ) -> Result<InvestigationStage, WorkflowError> {
        if justification.trim().is_empty() {
            return Err(WorkflowError::MissingJustification(id.to_string()));
        }
        let investigation = self
            .investigations
            .get_mut(id)
            .ok_or_else(|| WorkflowError::InvestigationNotFound(id.to_string()))?;
        let next = investigation
            .stage
            .next()
            .ok_or(WorkflowError::TerminalStage {
                id: id.to_string(),
                stage: investigation.stage,
            })?;

        let prior = investigation.stage;
        investigation.stage = next;
        tracing::info!(id = %id, from = %prior, to = %next, "investigation stage advanced");
        self.audit.append(
            id,
            actor,
            "stage_advanced",
            format!("{prior} -> {next}: {justification}"),
            self.clock.now(),
        );
        Ok(next)
    }

    /// Append an evidence item to an open case file
    pub fn add_evidence(
        &mut self,
        investigation_id: &str,
        item: EvidenceItem,
        actor: &str,
    ) -> Result<(), WorkflowError> {
        self.ensure_case_open(investigation_id)?;
        let investigation = self
            .investigations
            .get_mut(investigation_id)
            .ok_or_else(|| WorkflowError::InvestigationNotFound(investigation_id.to_string()))?;

        let detail = format!("evidence from {}: {}", item.source, item.description);
        investigation.evidence.push(item);
        self.audit.append(
            investigation_id,
            actor,
            "evidence_added",
            detail,
            self.clock.now(),
        );
        Ok(())
    }

    /// Append a responsible party to an open case file
    pub fn add_responsible_party(
        &mut self,
        investigation_id: &str,
        party: ResponsibleParty,
        actor: &str,
    ) -> Result<(), WorkflowError> {
        self.ensure_case_open(investigation_id)?;
        let investigation = self
            .investigations
            .get_mut(investigation_id)
            .ok_or_else(|| WorkflowError::InvestigationNotFound(investigation_id.to_string()))?;

        let detail = format!("responsible party named: {} ({})", party.name, party.position);
        investigation.responsible_parties.push(party);
        self.audit.append(
            investigation_id,
            actor,
            "responsible_party_added",
            detail,
            self.clock.now(),
        );
        Ok(())
    }

    /// Record that a named responsible party has answered the findings
    pub fn record_rebuttal(
        &mut self,
        investigation_id: &str,
        party_name: &str,
        actor: &str,
    ) -> Result<(), WorkflowError> {
        self.with_party(investigation_id, party_name, actor, "rebuttal_received", |p| {
            p.rebuttal_received = true;
        })
    }

    /// Confirm the finding against a named responsible party.
    ///
    /// Separate from `record_rebuttal`: due process requires an explicit
    /// confirmation step, never an implicit one.
    pub fn confirm_party(
        &mut self,
        investigation_id: &str,
        party_name: &str,
        actor: &str,
    ) -> Result<(), WorkflowError> {
        self.with_party(investigation_id, party_name, actor, "party_confirmed", |p| {
            p.is_confirmed = true;
        })
    }

    fn with_party(
        &mut self,
        investigation_id: &str,
        party_name: &str,
        actor: &str,
        action: &str,
        apply: impl FnOnce(&mut ResponsibleParty),
    ) -> Result<(), WorkflowError> {
        self.ensure_case_open(investigation_id)?;
        let investigation = self
            .investigations
            .get_mut(investigation_id)
            .ok_or_else(|| WorkflowError::InvestigationNotFound(investigation_id.to_string()))?;
        let party = investigation
            .responsible_parties
            .iter_mut()
            .find(|p| p.name == party_name)
            .ok_or_else(|| WorkflowError::PartyNotFound {
                investigation: investigation_id.to_string(),
                name: party_name.to_string(),
            })?;

        apply(party);
        self.audit.append(
            investigation_id,
            actor,
            action,
            party_name.to_string(),
            self.clock.now(),
        );
        Ok(())
    }

    /// Case files of closed violations are read-only
    fn ensure_case_open(&self, investigation_id: &str) -> Result<(), WorkflowError> {
        let investigation = self.investigation(investigation_id)?;
        let violation = self.violation(&investigation.violation_id)?;
        if violation.status.is_terminal() {
            return Err(WorkflowError::CaseClosed(violation.id.clone()));
        }
        Ok(())
    }
}

fn prefixed_id(prefix: &str) -> String {
    format!(
        "{prefix}-{}",
        &uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase()
    )
}
