//! Amount - Non-negative decimal wrapper for appropriated dollar amounts
//!
//! Every monetary magnitude in FundCtl (authority, distribution, commitment,
//! obligation, expenditure) MUST be non-negative. This is enforced at the
//! type level.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when working with amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),
}

/// A non-negative decimal amount of appropriated authority.
///
/// # Invariant
/// The inner value is always >= 0. This is enforced by the constructor.
///
/// # Example
/// ```
/// use fundctl_core::Amount;
/// use rust_decimal::Decimal;
///
/// let authority = Amount::new(Decimal::new(100_000_000, 0)).unwrap();
/// assert_eq!(authority.value(), Decimal::new(100_000_000, 0));
///
/// // Negative amounts are rejected
/// let negative = Amount::new(Decimal::new(-1, 0));
/// assert!(negative.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Zero amount constant
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new Amount from a Decimal.
    ///
    /// Returns an error if the value is negative.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            Err(AmountError::NegativeAmount(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Create an Amount without validation.
    ///
    /// # Safety
    /// The caller MUST ensure the value is non-negative.
    /// Use only for trusted sources (e.g., deserialization from validated storage).
    #[inline]
    pub const fn new_unchecked(value: Decimal) -> Self {
        Self(value)
    }

    /// Get the inner Decimal value
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition - returns None on overflow
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction - returns None if result would be negative
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        let result = self.0.checked_sub(other.0)?;
        if result < Decimal::ZERO {
            None
        } else {
            Some(Amount(result))
        }
    }

    /// Subtraction clamped at zero
    pub fn saturating_sub(&self, other: &Amount) -> Amount {
        self.checked_sub(other).unwrap_or(Amount::ZERO)
    }

    /// Signed difference `self - other` as a raw Decimal.
    ///
    /// Used for history-event classification, where the sign carries meaning.
    pub fn signed_delta(&self, other: &Amount) -> Decimal {
        self.0 - other.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_positive() {
        let amount = Amount::new(dec!(100)).unwrap();
        assert_eq!(amount.value(), dec!(100));
    }

    #[test]
    fn test_amount_zero() {
        let amount = Amount::new(Decimal::ZERO).unwrap();
        assert!(amount.is_zero());
    }

    #[test]
    fn test_amount_negative_rejected() {
        let result = Amount::new(dec!(-100));
        assert!(matches!(result, Err(AmountError::NegativeAmount(_))));
    }

    #[test]
    fn test_checked_sub_prevents_negative() {
        let a = Amount::new(dec!(50)).unwrap();
        let b = Amount::new(dec!(100)).unwrap();
        assert!(a.checked_sub(&b).is_none());
    }

    #[test]
    fn test_saturating_sub_clamps() {
        let a = Amount::new(dec!(50)).unwrap();
        let b = Amount::new(dec!(100)).unwrap();
        assert_eq!(a.saturating_sub(&b), Amount::ZERO);
        assert_eq!(b.saturating_sub(&a).value(), dec!(50));
    }

    #[test]
    fn test_signed_delta() {
        let a = Amount::new(dec!(70)).unwrap();
        let b = Amount::new(dec!(100)).unwrap();
        assert_eq!(a.signed_delta(&b), dec!(-30));
        assert_eq!(b.signed_delta(&a), dec!(30));
        assert_eq!(a.signed_delta(&a), Decimal::ZERO);
    }

    #[test]
    fn test_serde_roundtrip() {
        let amount = Amount::new(dec!(12345.67)).unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        let parsed: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, parsed);
    }
}
