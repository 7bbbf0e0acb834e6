//! FundCtl Validator - pure funds-control balance rules
//!
//! Pre-commit gatekeeper functions for the fund hierarchy. Everything here is
//! a pure function over balance snapshots, independent of storage, so the
//! statutory rules are directly unit-testable:
//!
//! - `classify_risk`: Antideficiency-Act risk classification of one node
//! - `validate_child_authority`: the 31 U.S.C. § 1517 parent/child
//!   undistributed-balance invariant

pub mod authority;
pub mod risk;

pub use authority::{validate_child_authority, AuthorityViolation, ParentHeadroom};
pub use risk::{classify_risk, AuthorityBalance, RiskLevel};
