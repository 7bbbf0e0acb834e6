//! Built-in determination tables
//!
//! Two rule sets ship with the engine: Project-Order-vs-Economy-Act
//! determination and Transfer-Authority determination. Both reuse the same
//! evaluator; only the tables differ.

use crate::graph::{question, result, DecisionTable, ResultKind, TableError};

/// Project-Order-vs-Economy-Act determination (41 U.S.C. § 23 / 31 U.S.C. § 1535)
pub fn project_order_table() -> Result<DecisionTable, TableError> {
    DecisionTable::new(
        "project_order",
        "q1",
        vec![
            question(
                "q1",
                "Will the work be performed by a Government-owned, Government-operated establishment?",
                "Project orders may only be placed with DoD-owned and DoD-operated \
                 establishments, plants or arsenals.",
                Some("q2"),
                Some("r_economy_act"),
                "41 U.S.C. \u{a7} 23",
            ),
            question(
                "q2",
                "Does the order specify definite end items, quantities and delivery dates?",
                "A project order must call for specific, definite products or services, \
                 not level-of-effort support.",
                Some("q3"),
                Some("r_not_project_order"),
                "DoD FMR Vol. 11A, Ch. 2",
            ),
            question(
                "q3",
                "Will the performing establishment begin work within a reasonable time after acceptance?",
                "Orders accepted without prompt performance do not qualify; funds would \
                 otherwise outlive their period of availability.",
                Some("q4"),
                Some("r_not_project_order"),
                "DoD FMR Vol. 11A, Ch. 2",
            ),
            question(
                "q4",
                "Is the ordered work within the normal scope of the performing establishment's operations?",
                "Work outside the establishment's normal mission must be ordered under \
                 the Economy Act instead.",
                Some("r_project_order"),
                Some("r_economy_act"),
                "41 U.S.C. \u{a7} 23",
            ),
        ],
        vec![
            result(
                "r_project_order",
                "Project order authorized",
                ResultKind::Success,
                "The order qualifies as a project order under 41 U.S.C. \u{a7} 23; \
                 cite the ordering appropriation and obligate upon acceptance.",
            ),
            result(
                "r_economy_act",
                "Use the Economy Act",
                ResultKind::Info,
                "Place the order under 31 U.S.C. \u{a7} 1535; funds deobligate to the \
                 extent the performing agency has not incurred obligations by the end \
                 of the period of availability.",
            ),
            result(
                "r_not_project_order",
                "Order does not qualify",
                ResultKind::Error,
                "The requirement as described fails the project-order criteria; \
                 restructure the order or use a different ordering authority.",
            ),
        ],
    )
}

/// Transfer-Authority determination (31 U.S.C. §§ 1532, 1517)
pub fn transfer_authority_table() -> Result<DecisionTable, TableError> {
    DecisionTable::new(
        "transfer_authority",
        "q1",
        vec![
            question(
                "q1",
                "Is there specific statutory authority for this transfer between appropriations?",
                "Amounts may be withdrawn from one appropriation and credited to \
                 another only as authorized by law.",
                Some("q2"),
                Some("r_no_authority"),
                "31 U.S.C. \u{a7} 1532",
            ),
            question(
                "q2",
                "Is the transfer for a higher-priority item, based on unforeseen military requirements?",
                "General transfer authority is limited to higher-priority, unforeseen \
                 requirements and may not fund items previously denied by Congress.",
                Some("q3"),
                Some("r_denied"),
                "Annual DoD Appropriations Act, GTA provision",
            ),
            question(
                "q3",
                "Has the item been previously denied by the Congress?",
                "A congressional denial is disqualifying regardless of priority.",
                Some("r_denied"),
                Some("q4"),
                "Annual DoD Appropriations Act, GTA provision",
            ),
            question(
                "q4",
                "Will the gaining account remain within its administrative subdivisions after the transfer?",
                "The transfer must not create an over-distribution in the gaining \
                 account's formal subdivisions of funds.",
                Some("r_approved"),
                Some("r_realign_first"),
                "31 U.S.C. \u{a7} 1517",
            ),
        ],
        vec![
            result(
                "r_approved",
                "Transfer supportable",
                ResultKind::Success,
                "Prepare the DD 1415-1 reprogramming action citing the applicable \
                 transfer authority and congressional notification.",
            ),
            result(
                "r_no_authority",
                "No transfer authority",
                ResultKind::Error,
                "31 U.S.C. \u{a7} 1532 prohibits the transfer absent specific statutory \
                 authority; an unauthorized transfer is itself a reportable violation.",
            ),
            result(
                "r_denied",
                "Transfer not permissible",
                ResultKind::Error,
                "General transfer authority cannot fund this requirement; seek a \
                 specific appropriation or defer the requirement.",
            ),
            result(
                "r_realign_first",
                "Realign subdivisions first",
                ResultKind::Info,
                "Adjust the gaining account's administrative subdivisions before \
                 executing the transfer to avoid an over-distribution.",
            ),
        ],
    )
}
