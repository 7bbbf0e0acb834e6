//! Parent/child authority validation (31 U.S.C. § 1517)
//!
//! A node's total authority must not exceed its parent's undistributed
//! balance. The check runs before any node is admitted to the hierarchy by
//! the store's write path; it is pure, so it is also directly unit-testable.

use fundctl_core::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The slice of a parent node the § 1517 check needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentHeadroom {
    pub total_authority: Amount,
    pub amount_distributed: Amount,
}

impl ParentHeadroom {
    pub fn new(total_authority: Amount, amount_distributed: Amount) -> Self {
        Self {
            total_authority,
            amount_distributed,
        }
    }

    /// Undistributed balance adjusted for a child's prior authority.
    ///
    /// `prior` is the child's authority already counted in
    /// `amount_distributed` (zero when creating a new child), so in-place
    /// edits compare against the correct remaining balance. The result can be
    /// negative when the parent is itself over-distributed.
    pub fn available(&self, prior: Amount) -> Decimal {
        self.total_authority.value() - self.amount_distributed.value() + prior.value()
    }
}

/// Rejection of a child authority amount that exceeds the parent's
/// undistributed balance
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "31 U.S.C. \u{a7} 1517: requested authority {requested} exceeds the parent's \
     undistributed balance {available} (shortfall {shortfall})"
)]
pub struct AuthorityViolation {
    /// Candidate child authority
    pub requested: Decimal,
    /// Parent undistributed balance (with prior add-back applied)
    pub available: Decimal,
    /// `requested - available`
    pub shortfall: Decimal,
}

/// Validate a candidate child authority against the parent's live headroom.
///
/// `prior` is the child node's own prior total authority when the write is an
/// edit; pass `Amount::ZERO` for a creation. Equality at the boundary passes.
pub fn validate_child_authority(
    candidate: Amount,
    parent: &ParentHeadroom,
    prior: Amount,
) -> Result<(), AuthorityViolation> {
    let available = parent.available(prior);
    let requested = candidate.value();

    if requested > available {
        let violation = AuthorityViolation {
            requested,
            available,
            shortfall: requested - available,
        };
        tracing::warn!(%violation, "child authority rejected");
        return Err(violation);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amount(val: Decimal) -> Amount {
        Amount::new(val).unwrap()
    }

    #[test]
    fn test_scenario_parent_headroom_shortfall() {
        // Parent: 100M authority, 60M distributed; child asks 45M.
        // Available = 40M, shortfall = 5M.
        let parent = ParentHeadroom::new(amount(dec!(100000000)), amount(dec!(60000000)));

        let result = validate_child_authority(amount(dec!(45000000)), &parent, Amount::ZERO);
        let violation = result.unwrap_err();

        assert_eq!(violation.available, dec!(40000000));
        assert_eq!(violation.shortfall, dec!(5000000));
        assert!(violation.to_string().contains("1517"));
        assert!(violation.to_string().contains("5000000"));
    }

    #[test]
    fn test_boundary_equality_passes() {
        let parent = ParentHeadroom::new(amount(dec!(100)), amount(dec!(60)));

        assert!(validate_child_authority(amount(dec!(40)), &parent, Amount::ZERO).is_ok());
        assert!(validate_child_authority(amount(dec!(40.01)), &parent, Amount::ZERO).is_err());
    }

    #[test]
    fn test_edit_adds_back_prior_authority() {
        // Parent fully distributed; the child currently holds 30 of it.
        let parent = ParentHeadroom::new(amount(dec!(100)), amount(dec!(100)));
        let prior = amount(dec!(30));

        // Re-sizing the child up to its prior share passes...
        assert!(validate_child_authority(amount(dec!(30)), &parent, prior).is_ok());
        assert!(validate_child_authority(amount(dec!(25)), &parent, prior).is_ok());
        // ...but growing beyond it fails with the exact shortfall.
        let violation =
            validate_child_authority(amount(dec!(31)), &parent, prior).unwrap_err();
        assert_eq!(violation.shortfall, dec!(1));
    }

    #[test]
    fn test_creation_uses_zero_prior() {
        let parent = ParentHeadroom::new(amount(dec!(100)), amount(dec!(100)));
        let violation =
            validate_child_authority(amount(dec!(1)), &parent, Amount::ZERO).unwrap_err();
        assert_eq!(violation.available, dec!(0));
        assert_eq!(violation.shortfall, dec!(1));
    }

    #[test]
    fn test_over_distributed_parent_reports_negative_available() {
        let parent = ParentHeadroom::new(amount(dec!(100)), amount(dec!(120)));
        let violation =
            validate_child_authority(amount(dec!(10)), &parent, Amount::ZERO).unwrap_err();
        assert_eq!(violation.available, dec!(-20));
        assert_eq!(violation.shortfall, dec!(30));
    }
}
