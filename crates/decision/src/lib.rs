//! FundCtl Decision - table-driven determination flows
//!
//! A generic yes/no decision-graph evaluator plus the two built-in rule
//! sets that drive the Project-Order and Transfer-Authority determinations.
//! Tables are validated at load time (resolved edges, acyclic, fully
//! connected), so a walk always terminates and a fixed answer sequence is
//! deterministic.

pub mod graph;
pub mod tables;
pub mod walker;

pub use graph::{
    question, result, Answer, DecisionTable, QuestionNode, ResultKind, ResultNode, TableError,
};
pub use tables::{project_order_table, transfer_authority_table};
pub use walker::{Position, WalkError, Walker};
