//! A blocked general-ledger posting seeds a violation case end to end:
//! cross-check fails, the seed maps to a violation draft, an officer is
//! appointed and the investigation opens.

use std::sync::Arc;

use fundctl_core::{Amount, FixedClock, FundLevel};
use fundctl_hierarchy::{
    check_transaction, GlTransaction, GlTransactionKind, HierarchyStore, NodeDraft,
};
use fundctl_workflow::{
    Caseload, InvestigatingOfficer, InvestigationStage, ViolationDraft, ViolationStatus,
    ViolationType,
};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

#[test]
fn test_blocked_posting_becomes_investigated_case() -> anyhow::Result<()> {
    let clock = Arc::new(FixedClock::at_date(2025, 6, 15));

    let mut store = HierarchyStore::new(clock.clone());
    store.create_root(
        NodeDraft::new(
            "1st Bde",
            FundLevel::Allocation,
            "OMA-2025-1B".parse()?,
            Amount::new(dec!(10000000))?,
        ),
        "comptroller.a",
    )?;

    let tx = GlTransaction {
        id: "TX-4411".to_string(),
        fund_code: "OMA-2025-1B".parse()?,
        kind: GlTransactionKind::Obligation,
        amount: Amount::new(dec!(10250000))?,
        description: "depot maintenance contract".to_string(),
    };
    let violation = check_transaction(&store, &tx).unwrap_err();
    let seed = violation
        .seed_violation("1st Bde", clock.0.date_naive())
        .unwrap();

    // The seed's wire code parses straight into the case model.
    let suspected: ViolationType = seed.suspected_type.parse()?;
    assert_eq!(suspected, ViolationType::AmountLimitation);

    let mut cases = Caseload::new(clock);
    let vid = cases.open_violation(
        ViolationDraft::new(
            suspected,
            seed.discovery_date,
            seed.amount,
            seed.organization,
            seed.description,
        ),
        "comptroller.a",
    );
    assert_eq!(cases.violation(&vid)?.status, ViolationStatus::Suspected);

    let candidate = InvestigatingOfficer::candidate(
        "IO-7",
        "Maj. Reyes",
        "O-4",
        "2nd Bde",
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
    );
    let inv = cases.appoint_officer(&vid, candidate, "comptroller.a")?;
    assert_eq!(
        cases.investigation(&inv)?.stage,
        InvestigationStage::IoAppointment
    );

    let description = &cases.violation(&vid)?.description;
    assert!(description.contains("31 U.S.C."));
    Ok(())
}
