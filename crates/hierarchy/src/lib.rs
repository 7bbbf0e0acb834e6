//! FundCtl Hierarchy - the fund control tree
//!
//! Owns the forest of fund control nodes as an arena (flat map keyed by id
//! with a parent index), so lookup-by-id is O(1) and edits never deep-copy
//! the tree. Every mutation is validated against the live parent state,
//! appends exactly one history event, writes an audit record and notifies
//! subscribers - in that order.
//!
//! The GL-to-ADA cross validator lives here too (`gl`): it checks a proposed
//! general-ledger transaction against the hierarchy before it may post.

pub mod error;
pub mod gl;
pub mod node;
pub mod store;

pub use error::HierarchyError;
pub use gl::{check_transaction, GlCheck, GlTransaction, GlTransactionKind, GlViolation, ViolationSeed};
pub use node::{FundNode, HistoryAction, HistoryEvent, NodeChange, NodeDraft};
pub use store::{ChangeKind, ChangeNotice, FundView, HierarchyStore, SubscriptionId};
