//! Fund control nodes and their authority history
//!
//! A `FundNode` is one echelon of appropriated authority. Nodes are owned
//! exclusively by the hierarchy store: existence and position change only
//! through validated store mutations, and nodes are never physically deleted
//! so their history stays addressable.

use chrono::{DateTime, Utc};
use fundctl_core::{Amount, FundCode, FundLevel};
use fundctl_validator::{AuthorityBalance, ParentHeadroom};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Justification prefix marking a non-financial (zero-delta) update
pub const NON_FINANCIAL_PREFIX: &str = "[non-financial] ";

/// Classification of one authority history event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Created,
    Increased,
    Decreased,
    Updated,
}

/// Immutable audit record on a node's authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub action: HistoryAction,
    /// Magnitude of the authority delta; zero for pure metadata edits
    pub amount: Amount,
    pub justification: String,
}

impl HistoryEvent {
    /// Event for a brand-new node: always `Created`, regardless of delta sign.
    pub fn created(
        user: impl Into<String>,
        total_authority: Amount,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            user: user.into(),
            action: HistoryAction::Created,
            amount: total_authority,
            justification: String::new(),
        }
    }

    /// Classify an edit from the authority delta.
    ///
    /// Positive delta ⇒ `Increased` (amount = delta); negative ⇒ `Decreased`
    /// (amount = |delta|); zero ⇒ `Updated` with amount 0 and the
    /// justification prefixed to mark a non-financial update.
    pub fn for_edit(
        old_authority: Amount,
        new_authority: Amount,
        user: impl Into<String>,
        justification: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let delta = new_authority.signed_delta(&old_authority);
        let justification = justification.into();

        let (action, amount, justification) = if delta > Decimal::ZERO {
            (
                HistoryAction::Increased,
                Amount::new_unchecked(delta),
                justification,
            )
        } else if delta < Decimal::ZERO {
            (
                HistoryAction::Decreased,
                Amount::new_unchecked(-delta),
                justification,
            )
        } else {
            (
                HistoryAction::Updated,
                Amount::ZERO,
                format!("{NON_FINANCIAL_PREFIX}{justification}"),
            )
        };

        Self {
            timestamp,
            user: user.into(),
            action,
            amount,
            justification,
        }
    }
}

/// One fund control node - a single echelon of appropriated authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundNode {
    /// Unique identifier (`FCN-XXXXXXXX`)
    pub id: String,

    /// Owning node; `None` for roots
    pub parent_id: Option<String>,

    pub name: String,

    /// Fund-control echelon
    pub level: FundLevel,

    /// Unique fund code, resolved by exact lookup
    pub fund_code: FundCode,

    pub total_authority: Amount,
    pub amount_distributed: Amount,
    pub amount_committed: Amount,
    pub amount_obligated: Amount,
    pub amount_expended: Amount,

    /// Centrally-managed-account flag
    pub is_cma: bool,

    /// Child node ids, in creation order
    pub children: Vec<String>,

    /// Append-only authority history, in commit order
    pub history: Vec<HistoryEvent>,
}

impl FundNode {
    /// Balance snapshot for risk classification
    pub fn balance(&self) -> AuthorityBalance {
        AuthorityBalance {
            total_authority: self.total_authority,
            amount_distributed: self.amount_distributed,
            amount_committed: self.amount_committed,
            amount_obligated: self.amount_obligated,
            amount_expended: self.amount_expended,
        }
    }

    /// The slice of this node the § 1517 child check needs
    pub fn headroom(&self) -> ParentHeadroom {
        ParentHeadroom::new(self.total_authority, self.amount_distributed)
    }
}

/// Attributes for creating a new node; consumption figures start at zero
#[derive(Debug, Clone)]
pub struct NodeDraft {
    pub name: String,
    pub level: FundLevel,
    pub fund_code: FundCode,
    pub total_authority: Amount,
    pub is_cma: bool,
}

impl NodeDraft {
    pub fn new(
        name: impl Into<String>,
        level: FundLevel,
        fund_code: FundCode,
        total_authority: Amount,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            fund_code,
            total_authority,
            is_cma: false,
        }
    }

    /// Mark the node as a centrally managed account
    pub fn cma(mut self) -> Self {
        self.is_cma = true;
        self
    }
}

/// Requested changes to an existing node.
///
/// `None` fields are left untouched. The justification is mandatory and is
/// recorded on the resulting history event.
#[derive(Debug, Clone, Default)]
pub struct NodeChange {
    pub name: Option<String>,
    pub total_authority: Option<Amount>,
    pub amount_distributed: Option<Amount>,
    pub amount_committed: Option<Amount>,
    pub amount_obligated: Option<Amount>,
    pub amount_expended: Option<Amount>,
    pub is_cma: Option<bool>,
    pub justification: String,
}

impl NodeChange {
    pub fn new(justification: impl Into<String>) -> Self {
        Self {
            justification: justification.into(),
            ..Default::default()
        }
    }

    pub fn total_authority(mut self, amount: Amount) -> Self {
        self.total_authority = Some(amount);
        self
    }

    pub fn amount_distributed(mut self, amount: Amount) -> Self {
        self.amount_distributed = Some(amount);
        self
    }

    pub fn amount_committed(mut self, amount: Amount) -> Self {
        self.amount_committed = Some(amount);
        self
    }

    pub fn amount_obligated(mut self, amount: Amount) -> Self {
        self.amount_obligated = Some(amount);
        self
    }

    pub fn amount_expended(mut self, amount: Amount) -> Self {
        self.amount_expended = Some(amount);
        self
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
