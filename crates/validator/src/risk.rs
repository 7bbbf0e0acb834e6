//! Antideficiency risk classification
//!
//! Pure function of a node's four consumption figures versus its total
//! authority. Rules evaluate in order; first match wins.

use fundctl_core::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Consumption ratio above which a node is flagged as Warning (95%)
pub const WARNING_RATIO: Decimal = Decimal::from_parts(95, 0, 0, false, 2);

/// Risk classification of a fund control node - ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low = 1,
    Warning = 2,
    Critical = 3,
}

impl PartialOrd for RiskLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RiskLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

impl Default for RiskLevel {
    fn default() -> Self {
        RiskLevel::Low
    }
}

/// Snapshot of one node's authority and consumption figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityBalance {
    pub total_authority: Amount,
    pub amount_distributed: Amount,
    pub amount_committed: Amount,
    pub amount_obligated: Amount,
    pub amount_expended: Amount,
}

impl AuthorityBalance {
    /// Largest of the four consumption figures
    pub fn max_consumption(&self) -> Amount {
        self.amount_distributed
            .max(self.amount_committed)
            .max(self.amount_obligated)
            .max(self.amount_expended)
    }
}

/// Classify a node's Antideficiency risk.
///
/// Rules, first match wins:
/// 1. Critical if distributed > total authority
/// 2. Critical if committed > total authority
/// 3. Critical if obligated > total authority (statutory over-obligation)
/// 4. Critical if expended > obligated (expenditure outrunning obligation is a
///    control failure regardless of authority headroom)
/// 5. Warning if max(consumption) / total authority > 0.95
/// 6. Low otherwise
pub fn classify_risk(balance: &AuthorityBalance) -> RiskLevel {
    let authority = balance.total_authority;

    if balance.amount_distributed > authority
        || balance.amount_committed > authority
        || balance.amount_obligated > authority
    {
        return RiskLevel::Critical;
    }
    if balance.amount_expended > balance.amount_obligated {
        return RiskLevel::Critical;
    }

    // Rules 1-3 already caught any consumption against zero authority.
    if authority.is_zero() {
        return RiskLevel::Low;
    }

    let ratio = balance.max_consumption().value() / authority.value();
    if ratio > WARNING_RATIO {
        RiskLevel::Warning
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amount(val: Decimal) -> Amount {
        Amount::new(val).unwrap()
    }

    fn balance(
        authority: Decimal,
        distributed: Decimal,
        committed: Decimal,
        obligated: Decimal,
        expended: Decimal,
    ) -> AuthorityBalance {
        AuthorityBalance {
            total_authority: amount(authority),
            amount_distributed: amount(distributed),
            amount_committed: amount(committed),
            amount_obligated: amount(obligated),
            amount_expended: amount(expended),
        }
    }

    #[test]
    fn test_over_distribution_is_critical() {
        let b = balance(dec!(100), dec!(101), dec!(0), dec!(0), dec!(0));
        assert_eq!(classify_risk(&b), RiskLevel::Critical);
    }

    #[test]
    fn test_over_commitment_is_critical() {
        let b = balance(dec!(100), dec!(0), dec!(100.01), dec!(0), dec!(0));
        assert_eq!(classify_risk(&b), RiskLevel::Critical);
    }

    #[test]
    fn test_over_obligation_is_critical() {
        // 10,000,001 obligated against 10,000,000 of authority
        let b = balance(
            dec!(10000000),
            dec!(0),
            dec!(0),
            dec!(10000001),
            dec!(0),
        );
        assert_eq!(classify_risk(&b), RiskLevel::Critical);
    }

    #[test]
    fn test_expenditure_outrunning_obligation_is_critical() {
        // Plenty of headroom against authority, but expended > obligated
        let b = balance(dec!(1000), dec!(0), dec!(0), dec!(100), dec!(150));
        assert_eq!(classify_risk(&b), RiskLevel::Critical);
    }

    #[test]
    fn test_warning_above_95_percent() {
        // 9.6M / 10M = 96%
        let b = balance(dec!(10000000), dec!(0), dec!(0), dec!(9600000), dec!(100));
        assert_eq!(classify_risk(&b), RiskLevel::Warning);
    }

    #[test]
    fn test_low_at_or_below_95_percent() {
        // 94% is Low
        let b = balance(dec!(10000000), dec!(0), dec!(0), dec!(9400000), dec!(100));
        assert_eq!(classify_risk(&b), RiskLevel::Low);

        // Exactly 95% is still Low (strict inequality)
        let boundary = balance(dec!(100), dec!(95), dec!(0), dec!(0), dec!(0));
        assert_eq!(classify_risk(&boundary), RiskLevel::Low);
    }

    #[test]
    fn test_zero_authority_zero_consumption_is_low() {
        let b = balance(dec!(0), dec!(0), dec!(0), dec!(0), dec!(0));
        assert_eq!(classify_risk(&b), RiskLevel::Low);
    }

    #[test]
    fn test_zero_authority_any_consumption_is_critical() {
        let b = balance(dec!(0), dec!(0), dec!(1), dec!(0), dec!(0));
        assert_eq!(classify_risk(&b), RiskLevel::Critical);
    }

    #[test]
    fn test_critical_regardless_of_other_fields() {
        // Obligated over authority dominates even when everything else is tiny
        let b = balance(dec!(100), dec!(1), dec!(1), dec!(101), dec!(1));
        assert_eq!(classify_risk(&b), RiskLevel::Critical);
    }

    #[test]
    fn test_risk_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Warning);
        assert!(RiskLevel::Warning < RiskLevel::Critical);
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Warning).unwrap(),
            "\"warning\""
        );
    }
}
