//! Hierarchy error types

use fundctl_core::amount::AmountError;
use fundctl_core::FundLevel;
use fundctl_validator::AuthorityViolation;
use thiserror::Error;

/// Errors from the fund hierarchy store
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// Operation referenced an id absent from the store. Never a silent
    /// no-op: ignoring unknown ids masks bugs.
    #[error("Fund control node not found: {0}")]
    NotFound(String),

    #[error("No fund control node carries fund code {0}")]
    UnknownFundCode(String),

    #[error("Fund code {0} is already assigned to node {1}")]
    DuplicateFundCode(String, String),

    /// Parent/child echelon ordering violated
    #[error("A {parent} node cannot own a {child} child: children must sit at a lower echelon")]
    LevelOrder { parent: FundLevel, child: FundLevel },

    /// The 31 U.S.C. § 1517 undistributed-balance check failed
    #[error(transparent)]
    Authority(#[from] AuthorityViolation),

    /// Every edit to an existing node must carry a justification
    #[error("Justification is mandatory when editing node {0}")]
    MissingJustification(String),

    #[error(transparent)]
    Amount(#[from] AmountError),

    /// Authority figures overflowed Decimal range
    #[error("Arithmetic overflow while adjusting authority for node {0}")]
    ArithmeticOverflow(String),
}
