//! FundCode - Unique fund identifiers
//!
//! Format: uppercase alphanumeric segments separated by hyphens,
//! e.g. `OMA-2025-0140`. GL transactions reference hierarchy nodes by fund
//! code, resolved by exact lookup - never by name matching.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from fund code parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FundCodeError {
    #[error("Fund code cannot be empty")]
    Empty,

    #[error("Fund code contains invalid character '{ch}': {code}")]
    InvalidCharacter { code: String, ch: char },
}

/// A validated fund code.
///
/// Input is normalized to uppercase; only `A-Z`, `0-9` and `-` are allowed.
///
/// # Example
/// ```
/// use fundctl_core::FundCode;
///
/// let code: FundCode = "oma-2025-0140".parse().unwrap();
/// assert_eq!(code.as_str(), "OMA-2025-0140");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FundCode(String);

impl FundCode {
    /// Parse and normalize a fund code
    pub fn new(code: impl AsRef<str>) -> Result<Self, FundCodeError> {
        let normalized = code.as_ref().trim().to_uppercase();
        if normalized.is_empty() {
            return Err(FundCodeError::Empty);
        }
        if let Some(ch) = normalized
            .chars()
            .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(FundCodeError::InvalidCharacter {
                code: normalized,
                ch,
            });
        }
        Ok(Self(normalized))
    }

    /// Get the normalized code string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FundCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FundCode {
    type Err = FundCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FundCode {
    type Error = FundCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FundCode> for String {
    fn from(code: FundCode) -> Self {
        code.0
    }
}
