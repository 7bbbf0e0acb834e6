//! GL-to-ADA cross validator
//!
//! Screens a proposed general-ledger transaction against the fund hierarchy
//! before it may post. The transaction names its fund by fund code, resolved
//! through the store's unique code index; the projected consumption is then
//! risk-classified, and any Critical projection blocks the posting with a
//! citation-bearing violation that can seed a workflow case.

use chrono::NaiveDate;
use fundctl_core::{Amount, FundCode};
use fundctl_validator::{classify_risk, AuthorityBalance, RiskLevel};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;

use crate::store::HierarchyStore;

/// The consumption stage a GL transaction posts against
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlTransactionKind {
    Commitment,
    Obligation,
    Expenditure,
}

/// A proposed general-ledger transaction, not yet posted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlTransaction {
    pub id: String,
    pub fund_code: FundCode,
    pub kind: GlTransactionKind,
    pub amount: Amount,
    pub description: String,
}

/// Outcome of a passing cross-check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlCheck {
    /// The fund control node the transaction resolved to
    pub node_id: String,
    /// Balance as it would stand after posting
    pub projected: AuthorityBalance,
    /// Risk classification of the projected balance
    pub risk: RiskLevel,
}

/// Why a transaction may not post
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GlViolation {
    #[error("No fund control node carries fund code {0}; transaction {1} cannot be attributed")]
    UnknownFundCode(FundCode, String),

    #[error(
        "31 U.S.C. \u{a7} 1517: posting {kind} {amount} against {fund_code} would raise \
         consumption to {projected}, exceeding the node's total authority {authority} \
         (shortfall {shortfall})"
    )]
    AuthorityExceeded {
        fund_code: FundCode,
        kind: GlTransactionKind,
        amount: Amount,
        projected: Amount,
        authority: Amount,
        shortfall: rust_decimal::Decimal,
    },

    #[error(
        "Expenditure {amount} against {fund_code} would raise total expenditures to \
         {projected}, exceeding the obligated balance {obligated}"
    )]
    ExpenditureExceedsObligation {
        fund_code: FundCode,
        amount: Amount,
        projected: Amount,
        obligated: Amount,
    },

    #[error(
        "Posting {kind} {amount} against {fund_code} overflows the projected \
         consumption figure; the transaction cannot be validated"
    )]
    ProjectionOverflow {
        fund_code: FundCode,
        kind: GlTransactionKind,
        amount: Amount,
    },
}

/// Intake attributes for opening a workflow case from a blocked posting.
///
/// Plain data so the case layer owns the mapping to its own violation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationSeed {
    /// Suspected statutory breach as a wire code, named by the blocking rule
    pub suspected_type: String,
    pub amount: Amount,
    /// Organization the fund node belongs to (node name)
    pub organization: String,
    pub description: String,
    pub discovery_date: NaiveDate,
}

impl GlViolation {
    /// Case-intake seed for violations that evidence a statutory breach.
    ///
    /// An unknown fund code or an unprojectable amount is a data error, not
    /// a suspected violation, so neither yields a seed.
    pub fn seed_violation(&self, organization: &str, discovered: NaiveDate) -> Option<ViolationSeed> {
        match self {
            GlViolation::UnknownFundCode(..) | GlViolation::ProjectionOverflow { .. } => None,
            GlViolation::AuthorityExceeded { kind, amount, .. } => Some(ViolationSeed {
                suspected_type: match kind {
                    GlTransactionKind::Commitment => {
                        "ADMINISTRATIVE_CONTROL_LIMITATION".to_string()
                    }
                    _ => "AMOUNT_LIMITATION".to_string(),
                },
                amount: *amount,
                organization: organization.to_string(),
                description: self.to_string(),
                discovery_date: discovered,
            }),
            GlViolation::ExpenditureExceedsObligation { amount, .. } => Some(ViolationSeed {
                suspected_type: "ADMINISTRATIVE_CONTROL_LIMITATION".to_string(),
                amount: *amount,
                organization: organization.to_string(),
                description: self.to_string(),
                discovery_date: discovered,
            }),
        }
    }
}

/// Check a proposed transaction against the hierarchy.
///
/// Resolves the fund by exact fund-code lookup, projects the relevant
/// consumption figure, and blocks any posting whose projection breaches
/// authority (or, for expenditures, the obligated balance). Passing checks
/// still report the projected risk so callers can surface Warning states.
pub fn check_transaction(
    store: &HierarchyStore,
    tx: &GlTransaction,
) -> Result<GlCheck, GlViolation> {
    let node = store
        .node_by_fund_code(&tx.fund_code)
        .map_err(|_| GlViolation::UnknownFundCode(tx.fund_code.clone(), tx.id.clone()))?;

    let mut projected = node.balance();
    let target = match tx.kind {
        GlTransactionKind::Commitment => &mut projected.amount_committed,
        GlTransactionKind::Obligation => &mut projected.amount_obligated,
        GlTransactionKind::Expenditure => &mut projected.amount_expended,
    };
    *target = target
        .checked_add(&tx.amount)
        .ok_or_else(|| GlViolation::ProjectionOverflow {
            fund_code: tx.fund_code.clone(),
            kind: tx.kind,
            amount: tx.amount,
        })?;

    if tx.kind == GlTransactionKind::Expenditure
        && projected.amount_expended.value() > projected.amount_obligated.value()
    {
        tracing::warn!(tx = %tx.id, fund = %tx.fund_code, "expenditure exceeds obligated balance");
        return Err(GlViolation::ExpenditureExceedsObligation {
            fund_code: tx.fund_code.clone(),
            amount: tx.amount,
            projected: projected.amount_expended,
            obligated: projected.amount_obligated,
        });
    }

    let projected_consumption = match tx.kind {
        GlTransactionKind::Commitment => projected.amount_committed,
        GlTransactionKind::Obligation => projected.amount_obligated,
        GlTransactionKind::Expenditure => projected.amount_expended,
    };
    if projected_consumption.value() > projected.total_authority.value() {
        let shortfall = projected_consumption.value() - projected.total_authority.value();
        tracing::warn!(
            tx = %tx.id,
            fund = %tx.fund_code,
            %shortfall,
            "transaction blocked: projected consumption exceeds authority"
        );
        return Err(GlViolation::AuthorityExceeded {
            fund_code: tx.fund_code.clone(),
            kind: tx.kind,
            amount: tx.amount,
            projected: projected_consumption,
            authority: projected.total_authority,
            shortfall,
        });
    }

    Ok(GlCheck {
        node_id: node.id.clone(),
        risk: classify_risk(&projected),
        projected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeChange, NodeDraft};
    use fundctl_core::{FixedClock, FundLevel};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn amount(val: Decimal) -> Amount {
        Amount::new(val).unwrap()
    }

    fn code(s: &str) -> FundCode {
        s.parse().unwrap()
    }

    fn store_with_fund(authority: Decimal) -> HierarchyStore {
        let mut store = HierarchyStore::new(Arc::new(FixedClock::at_date(2025, 3, 1)));
        store
            .create_root(
                NodeDraft::new(
                    "4th Bn Operations",
                    FundLevel::Allocation,
                    code("OMA-2025-04"),
                    amount(authority),
                ),
                "comptroller.a",
            )
            .unwrap();
        store
    }

    fn tx(kind: GlTransactionKind, amount_val: Decimal) -> GlTransaction {
        GlTransaction {
            id: "TX-0001".to_string(),
            fund_code: code("OMA-2025-04"),
            kind,
            amount: amount(amount_val),
            description: "contract award".to_string(),
        }
    }

    #[test]
    fn test_obligation_within_authority_passes() {
        let store = store_with_fund(dec!(10000000));
        let check = check_transaction(&store, &tx(GlTransactionKind::Obligation, dec!(5000000)))
            .unwrap();
        assert_eq!(check.risk, RiskLevel::Low);
        assert_eq!(check.projected.amount_obligated, amount(dec!(5000000)));
    }

    #[test]
    fn test_obligation_over_authority_blocked_with_shortfall() {
        let store = store_with_fund(dec!(10000000));
        let err = check_transaction(&store, &tx(GlTransactionKind::Obligation, dec!(10000001)))
            .unwrap_err();
        match err {
            GlViolation::AuthorityExceeded { shortfall, .. } => {
                assert_eq!(shortfall, dec!(1));
            }
            other => panic!("expected authority violation, got {other:?}"),
        }
    }

    #[test]
    fn test_passing_check_reports_warning_risk() {
        let store = store_with_fund(dec!(10000000));
        let check = check_transaction(&store, &tx(GlTransactionKind::Obligation, dec!(9600000)))
            .unwrap();
        assert_eq!(check.risk, RiskLevel::Warning);
    }

    #[test]
    fn test_expenditure_without_obligation_blocked() {
        let store = store_with_fund(dec!(10000000));
        let err = check_transaction(&store, &tx(GlTransactionKind::Expenditure, dec!(1)))
            .unwrap_err();
        assert!(matches!(err, GlViolation::ExpenditureExceedsObligation { .. }));
    }

    #[test]
    fn test_unknown_fund_code() {
        let store = store_with_fund(dec!(10000000));
        let mut bad = tx(GlTransactionKind::Commitment, dec!(1));
        bad.fund_code = code("RDTE-9999");
        let err = check_transaction(&store, &bad).unwrap_err();
        assert!(matches!(err, GlViolation::UnknownFundCode(..)));
        assert!(err.seed_violation("4th Bn Operations", NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()).is_none());
    }

    #[test]
    fn test_unprojectable_amount_reported_as_overflow() {
        let mut store = HierarchyStore::new(Arc::new(FixedClock::at_date(2025, 3, 1)));
        let id = store
            .create_root(
                NodeDraft::new(
                    "4th Bn Operations",
                    FundLevel::Allocation,
                    code("OMA-2025-04"),
                    Amount::new_unchecked(Decimal::MAX),
                ),
                "comptroller.a",
            )
            .unwrap();
        store
            .update_node(
                &id,
                NodeChange::new("carry forward obligations").amount_obligated(Amount::new_unchecked(Decimal::MAX)),
                "comptroller.a",
            )
            .unwrap();

        let mut huge = tx(GlTransactionKind::Obligation, dec!(1));
        huge.amount = Amount::new_unchecked(Decimal::MAX);
        let err = check_transaction(&store, &huge).unwrap_err();
        assert!(matches!(err, GlViolation::ProjectionOverflow { .. }));
        assert!(err
            .seed_violation("4th Bn Operations", NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .is_none());
    }

    #[test]
    fn test_blocked_posting_seeds_a_case() {
        let store = store_with_fund(dec!(10000000));
        let err = check_transaction(&store, &tx(GlTransactionKind::Obligation, dec!(12000000)))
            .unwrap_err();
        let discovered = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let seed = err.seed_violation("4th Bn Operations", discovered).unwrap();
        assert_eq!(seed.suspected_type, "AMOUNT_LIMITATION");
        assert_eq!(seed.amount, amount(dec!(12000000)));
        assert_eq!(seed.organization, "4th Bn Operations");
        assert_eq!(seed.discovery_date, discovered);
        assert!(seed.description.contains("31 U.S.C."));
    }
}
