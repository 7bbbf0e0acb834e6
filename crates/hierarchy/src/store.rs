//! Hierarchy store - single-writer arena of fund control nodes
//!
//! Nodes live in a flat map keyed by id; each node stores its `parent_id`
//! and the ids of its children, and a fund-code index gives O(1) resolution
//! for GL cross-validation. A nested `FundView` forest is derived on demand
//! for presentation.
//!
//! Every write is one critical section: locate, validate, commit, audit,
//! notify. Methods take `&mut self`, so a multi-threaded host serializes
//! writers (e.g. behind a mutex); listeners run synchronously after the
//! commit completes, in commit order.

use std::collections::HashMap;
use std::sync::Arc;

use fundctl_audit::AuditLog;
use fundctl_core::{Amount, Clock, FundCode, SystemClock};
use fundctl_validator::validate_child_authority;

use crate::error::HierarchyError;
use crate::node::{FundNode, HistoryEvent, NodeChange, NodeDraft};

/// What a change notice reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
}

/// Published to subscribers after every committed mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    pub node_id: String,
    pub kind: ChangeKind,
}

/// Handle returned by `subscribe`; pass to `unsubscribe` to deregister
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Listener = Box<dyn Fn(&ChangeNotice) + Send>;

/// Read-only nested snapshot of one subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundView {
    pub node: FundNode,
    pub children: Vec<FundView>,
}

/// The fund hierarchy store
pub struct HierarchyStore {
    nodes: HashMap<String, FundNode>,
    roots: Vec<String>,
    code_index: HashMap<FundCode, String>,
    subscribers: Vec<Option<Listener>>,
    audit: AuditLog,
    clock: Arc<dyn Clock>,
}

impl HierarchyStore {
    /// Create an empty store with an injected clock
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            code_index: HashMap::new(),
            subscribers: Vec::new(),
            audit: AuditLog::new(),
            clock,
        }
    }

    /// Create an empty store on the system clock
    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    // === Reads ===

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Result<&FundNode, HierarchyError> {
        self.nodes
            .get(id)
            .ok_or_else(|| HierarchyError::NotFound(id.to_string()))
    }

    /// Resolve a node by its unique fund code (O(1) index lookup)
    pub fn node_by_fund_code(&self, code: &FundCode) -> Result<&FundNode, HierarchyError> {
        let id = self
            .code_index
            .get(code)
            .ok_or_else(|| HierarchyError::UnknownFundCode(code.to_string()))?;
        self.node(id)
    }

    /// Read-only snapshot of the whole forest.
    ///
    /// The returned structure is a deep clone; mutating it has no effect on
    /// the store.
    pub fn forest(&self) -> Vec<FundView> {
        self.roots
            .iter()
            .filter_map(|id| self.subtree_view(id))
            .collect()
    }

    fn subtree_view(&self, id: &str) -> Option<FundView> {
        let node = self.nodes.get(id)?;
        Some(FundView {
            node: node.clone(),
            children: node
                .children
                .iter()
                .filter_map(|child| self.subtree_view(child))
                .collect(),
        })
    }

    /// Root node ids, in creation order
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Number of nodes in the store
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The audit trail for all hierarchy mutations
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    // === Writes ===

    /// Create a root node (out-of-band administrator action).
    ///
    /// Roots have no parent, so no headroom check applies.
    pub fn create_root(&mut self, draft: NodeDraft, actor: &str) -> Result<String, HierarchyError> {
        self.ensure_code_free(&draft.fund_code)?;

        let now = self.clock.now();
        let id = next_node_id();
        let node = FundNode {
            id: id.clone(),
            parent_id: None,
            name: draft.name,
            level: draft.level,
            fund_code: draft.fund_code.clone(),
            total_authority: draft.total_authority,
            amount_distributed: Amount::ZERO,
            amount_committed: Amount::ZERO,
            amount_obligated: Amount::ZERO,
            amount_expended: Amount::ZERO,
            is_cma: draft.is_cma,
            children: Vec::new(),
            history: vec![HistoryEvent::created(actor, draft.total_authority, now)],
        };

        tracing::info!(id = %id, name = %node.name, level = %node.level, "root node created");
        let detail = format!("{} ({} {})", node.name, node.level, node.fund_code);
        self.code_index.insert(draft.fund_code, id.clone());
        self.nodes.insert(id.clone(), node);
        self.roots.push(id.clone());
        self.audit.append(&id, actor, "node_created", detail, now);
        self.notify(&ChangeNotice {
            node_id: id.clone(),
            kind: ChangeKind::Created,
        });

        Ok(id)
    }

    /// Create a child node under `parent_id`.
    ///
    /// Validates echelon ordering, fund-code uniqueness and the
    /// 31 U.S.C. § 1517 headroom check against the live parent; on success
    /// the child's authority is added to the parent's distributed total.
    pub fn create_child(
        &mut self,
        parent_id: &str,
        draft: NodeDraft,
        actor: &str,
    ) -> Result<String, HierarchyError> {
        let parent = self
            .nodes
            .get(parent_id)
            .ok_or_else(|| HierarchyError::NotFound(parent_id.to_string()))?;

        if !parent.level.may_parent(draft.level) {
            return Err(HierarchyError::LevelOrder {
                parent: parent.level,
                child: draft.level,
            });
        }
        self.ensure_code_free(&draft.fund_code)?;

        let parent = self.node(parent_id)?;
        validate_child_authority(draft.total_authority, &parent.headroom(), Amount::ZERO)?;
        let new_distributed = parent
            .amount_distributed
            .checked_add(&draft.total_authority)
            .ok_or_else(|| HierarchyError::ArithmeticOverflow(parent_id.to_string()))?;

        let now = self.clock.now();
        let id = next_node_id();
        let node = FundNode {
            id: id.clone(),
            parent_id: Some(parent_id.to_string()),
            name: draft.name,
            level: draft.level,
            fund_code: draft.fund_code.clone(),
            total_authority: draft.total_authority,
            amount_distributed: Amount::ZERO,
            amount_committed: Amount::ZERO,
            amount_obligated: Amount::ZERO,
            amount_expended: Amount::ZERO,
            is_cma: draft.is_cma,
            children: Vec::new(),
            history: vec![HistoryEvent::created(actor, draft.total_authority, now)],
        };

        tracing::info!(id = %id, parent = %parent_id, name = %node.name, "child node created");
        let detail = format!("{} ({} {})", node.name, node.level, node.fund_code);
        self.code_index.insert(draft.fund_code, id.clone());
        self.nodes.insert(id.clone(), node);
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.push(id.clone());
            parent.amount_distributed = new_distributed;
        }
        self.audit.append(&id, actor, "node_created", detail, now);
        self.notify(&ChangeNotice {
            node_id: id.clone(),
            kind: ChangeKind::Created,
        });

        Ok(id)
    }

    /// Apply a validated change to an existing node.
    ///
    /// A justification is mandatory. Authority changes are re-validated
    /// against the parent's headroom with the node's prior authority added
    /// back; exactly one history event is appended, classified by the
    /// authority delta. The parent's distributed total follows the delta.
    pub fn update_node(
        &mut self,
        id: &str,
        change: NodeChange,
        actor: &str,
    ) -> Result<(), HierarchyError> {
        if change.justification.trim().is_empty() {
            return Err(HierarchyError::MissingJustification(id.to_string()));
        }

        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| HierarchyError::NotFound(id.to_string()))?;
        let old_authority = node.total_authority;
        let new_authority = change.total_authority.unwrap_or(old_authority);
        let parent_id = node.parent_id.clone();

        // Stage the parent's new distributed total up front: every fallible
        // step must run before the first mutation so a rejected write leaves
        // no partial state behind.
        let mut staged_parent_distributed = None;
        if let Some(ref pid) = parent_id {
            let parent = self
                .nodes
                .get(pid)
                .ok_or_else(|| HierarchyError::NotFound(pid.clone()))?;
            validate_child_authority(new_authority, &parent.headroom(), old_authority)?;
            let adjusted = parent.amount_distributed.value() - old_authority.value()
                + new_authority.value();
            staged_parent_distributed = Some(Amount::new(adjusted)?);
        }

        let now = self.clock.now();
        let event = HistoryEvent::for_edit(
            old_authority,
            new_authority,
            actor,
            change.justification.clone(),
            now,
        );

        if let Some(node) = self.nodes.get_mut(id) {
            if let Some(name) = change.name {
                node.name = name;
            }
            node.total_authority = new_authority;
            if let Some(v) = change.amount_distributed {
                node.amount_distributed = v;
            }
            if let Some(v) = change.amount_committed {
                node.amount_committed = v;
            }
            if let Some(v) = change.amount_obligated {
                node.amount_obligated = v;
            }
            if let Some(v) = change.amount_expended {
                node.amount_expended = v;
            }
            if let Some(v) = change.is_cma {
                node.is_cma = v;
            }
            node.history.push(event);
        }

        // Keep the parent's distributed total in step with the authority delta
        // so the § 1517 headroom check always runs against live data.
        if let (Some(ref pid), Some(staged)) = (&parent_id, staged_parent_distributed) {
            if let Some(parent) = self.nodes.get_mut(pid) {
                parent.amount_distributed = staged;
            }
        }

        tracing::info!(id = %id, actor = %actor, "node updated");
        self.audit
            .append(id, actor, "node_updated", change.justification, now);
        self.notify(&ChangeNotice {
            node_id: id.to_string(),
            kind: ChangeKind::Updated,
        });

        Ok(())
    }

    // === Subscriptions ===

    /// Register a listener invoked after every committed mutation.
    ///
    /// Fire-and-forget: listeners run synchronously on the writer's call
    /// stack, after the commit completes, in commit order.
    pub fn subscribe(&mut self, listener: impl Fn(&ChangeNotice) + Send + 'static) -> SubscriptionId {
        self.subscribers.push(Some(Box::new(listener)));
        SubscriptionId(self.subscribers.len() - 1)
    }

    /// Deregister a listener
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        if let Some(slot) = self.subscribers.get_mut(id.0) {
            *slot = None;
        }
    }

    fn notify(&self, notice: &ChangeNotice) {
        for listener in self.subscribers.iter().flatten() {
            listener(notice);
        }
    }

    fn ensure_code_free(&self, code: &FundCode) -> Result<(), HierarchyError> {
        if let Some(existing) = self.code_index.get(code) {
            return Err(HierarchyError::DuplicateFundCode(
                code.to_string(),
                existing.clone(),
            ));
        }
        Ok(())
    }
}

fn next_node_id() -> String {
    format!(
        "FCN-{}",
        &uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase()
    )
}
