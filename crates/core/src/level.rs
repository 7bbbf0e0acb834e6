//! FundLevel - Legal fund-control echelons
//!
//! Each fund control node sits at one echelon of delegated spending
//! authority. The rank ordering is total: a child node must always sit at a
//! strictly lower echelon (higher rank) than its parent.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Echelons of delegated appropriation authority, highest first.
///
/// Suballotment is an optional echelon between Allotment and Allocation:
/// the default distribution chain (`next_level`) skips it, but a node at
/// Suballotment distributes downward to Allocation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundLevel {
    /// OMB apportionment of an appropriation
    Apportionment,

    /// Allotment issued to a major command or operating agency
    Allotment,

    /// Optional subdivision of an allotment
    Suballotment,

    /// Allocation to a subordinate organization
    Allocation,

    /// Suballocation - the lowest echelon, terminal
    Suballocation,
}

impl FundLevel {
    /// Total-order rank, 0 at the top of the hierarchy.
    ///
    /// Used by the hierarchy store to enforce that children sit strictly
    /// below their parents.
    pub fn rank(&self) -> u8 {
        match self {
            FundLevel::Apportionment => 0,
            FundLevel::Allotment => 1,
            FundLevel::Suballotment => 2,
            FundLevel::Allocation => 3,
            FundLevel::Suballocation => 4,
        }
    }

    /// Default next echelon when distributing authority downward.
    ///
    /// Returns `None` at the terminal echelon. The default chain skips the
    /// optional Suballotment echelon; a Suballotment itself distributes to
    /// Allocation.
    pub fn next_level(&self) -> Option<FundLevel> {
        match self {
            FundLevel::Apportionment => Some(FundLevel::Allotment),
            FundLevel::Allotment => Some(FundLevel::Allocation),
            FundLevel::Suballotment => Some(FundLevel::Allocation),
            FundLevel::Allocation => Some(FundLevel::Suballocation),
            FundLevel::Suballocation => None,
        }
    }

    /// Whether a node at `self` may own a child at `child`.
    pub fn may_parent(&self, child: FundLevel) -> bool {
        child.rank() > self.rank()
    }
}
