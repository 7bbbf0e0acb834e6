//! Decision tables - directed graphs of questions terminating in results
//!
//! A table is a set of yes/no questions whose edges point either at another
//! question or at a labeled result. Tables are validated when constructed:
//! every edge must resolve to a known id, the question graph must be acyclic
//! and every node must be reachable from the entry question. The evaluator
//! itself carries no domain knowledge; a new determination flow is added by
//! authoring a new table.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A yes/no answer to the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
}

/// Presentation class of a determination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Success,
    Info,
    Error,
}

/// One question in a decision table.
///
/// An absent `yes_next`/`no_next` is a terminal outcome reached immediately:
/// the walk completes with no determination payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionNode {
    pub id: String,
    pub text: String,
    pub description: String,
    pub yes_next: Option<String>,
    pub no_next: Option<String>,
    /// Regulatory citation backing the question
    pub citation: String,
}

impl QuestionNode {
    pub fn next(&self, answer: Answer) -> Option<&str> {
        match answer {
            Answer::Yes => self.yes_next.as_deref(),
            Answer::No => self.no_next.as_deref(),
        }
    }
}

/// A terminal determination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultNode {
    pub title: String,
    pub kind: ResultKind,
    pub desc: String,
}

/// Why a table failed load-time validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Table {table}: entry id {entry} is not a question")]
    UnknownEntry { table: String, entry: String },

    #[error("Table {table}: question id {id} is also a result id")]
    AmbiguousId { table: String, id: String },

    #[error("Table {table}: question {question} answer {answer:?} points at unknown id {target}")]
    DanglingEdge {
        table: String,
        question: String,
        answer: Answer,
        target: String,
    },

    #[error("Table {table}: cycle through question {question}")]
    Cycle { table: String, question: String },

    #[error("Table {table}: {id} is unreachable from the entry question")]
    Unreachable { table: String, id: String },
}

/// A validated decision table.
///
/// Only constructible through `new`, so a held table is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionTable {
    name: String,
    entry: String,
    questions: HashMap<String, QuestionNode>,
    results: HashMap<String, ResultNode>,
}

impl DecisionTable {
    /// Build and validate a table.
    ///
    /// Checks, in order: the entry id names a question; no id is both a
    /// question and a result; every edge resolves to a known question or
    /// result; the question graph is acyclic; every question and result is
    /// reachable from the entry.
    pub fn new(
        name: impl Into<String>,
        entry: impl Into<String>,
        questions: Vec<QuestionNode>,
        results: Vec<(String, ResultNode)>,
    ) -> Result<Self, TableError> {
        let name = name.into();
        let entry = entry.into();
        let questions: HashMap<String, QuestionNode> =
            questions.into_iter().map(|q| (q.id.clone(), q)).collect();
        let results: HashMap<String, ResultNode> = results.into_iter().collect();

        if !questions.contains_key(&entry) {
            return Err(TableError::UnknownEntry { table: name, entry });
        }
        for id in questions.keys() {
            if results.contains_key(id) {
                return Err(TableError::AmbiguousId {
                    table: name,
                    id: id.clone(),
                });
            }
        }
        for question in questions.values() {
            for answer in [Answer::Yes, Answer::No] {
                if let Some(target) = question.next(answer) {
                    if !questions.contains_key(target) && !results.contains_key(target) {
                        return Err(TableError::DanglingEdge {
                            table: name,
                            question: question.id.clone(),
                            answer,
                            target: target.to_string(),
                        });
                    }
                }
            }
        }

        let table = Self {
            name,
            entry,
            questions,
            results,
        };
        table.check_acyclic()?;
        table.check_reachable()?;
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn question(&self, id: &str) -> Option<&QuestionNode> {
        self.questions.get(id)
    }

    pub fn result(&self, id: &str) -> Option<&ResultNode> {
        self.results.get(id)
    }

    // Iterative DFS with a three-color marking over question ids only;
    // result ids are sinks and cannot participate in a cycle.
    fn check_acyclic(&self) -> Result<(), TableError> {
        let mut done: HashSet<&str> = HashSet::new();
        let mut in_path: HashSet<&str> = HashSet::new();

        for start in self.questions.keys() {
            if done.contains(start.as_str()) {
                continue;
            }
            let mut stack: Vec<(&str, bool)> = vec![(start.as_str(), false)];
            while let Some((id, expanded)) = stack.pop() {
                if expanded {
                    in_path.remove(id);
                    done.insert(id);
                    continue;
                }
                if done.contains(id) {
                    continue;
                }
                if !in_path.insert(id) {
                    return Err(TableError::Cycle {
                        table: self.name.clone(),
                        question: id.to_string(),
                    });
                }
                stack.push((id, true));
                if let Some(question) = self.questions.get(id) {
                    for answer in [Answer::Yes, Answer::No] {
                        if let Some(target) = question.next(answer) {
                            if in_path.contains(target) {
                                return Err(TableError::Cycle {
                                    table: self.name.clone(),
                                    question: target.to_string(),
                                });
                            }
                            if self.questions.contains_key(target) && !done.contains(target) {
                                stack.push((
                                    self.questions[target].id.as_str(),
                                    false,
                                ));
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn check_reachable(&self) -> Result<(), TableError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = vec![&self.entry];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(question) = self.questions.get(id) {
                for answer in [Answer::Yes, Answer::No] {
                    if let Some(target) = question.next(answer) {
                        stack.push(target);
                    }
                }
            }
        }

        for id in self.questions.keys().chain(self.results.keys()) {
            if !seen.contains(id.as_str()) {
                return Err(TableError::Unreachable {
                    table: self.name.clone(),
                    id: id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Shorthand for authoring question nodes in table definitions
pub fn question(
    id: &str,
    text: &str,
    description: &str,
    yes_next: Option<&str>,
    no_next: Option<&str>,
    citation: &str,
) -> QuestionNode {
    QuestionNode {
        id: id.to_string(),
        text: text.to_string(),
        description: description.to_string(),
        yes_next: yes_next.map(str::to_string),
        no_next: no_next.map(str::to_string),
        citation: citation.to_string(),
    }
}

/// Shorthand for authoring result nodes in table definitions
pub fn result(id: &str, title: &str, kind: ResultKind, desc: &str) -> (String, ResultNode) {
    (
        id.to_string(),
        ResultNode {
            title: title.to_string(),
            kind,
            desc: desc.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_step() -> Result<DecisionTable, TableError> {
        DecisionTable::new(
            "test",
            "q1",
            vec![
                question("q1", "First?", "", Some("q2"), Some("r_no"), "test cite"),
                question("q2", "Second?", "", Some("r_yes"), Some("r_no"), "test cite"),
            ],
            vec![
                result("r_yes", "Yes outcome", ResultKind::Success, ""),
                result("r_no", "No outcome", ResultKind::Error, ""),
            ],
        )
    }

    #[test]
    fn test_valid_table_loads() {
        let table = two_step().unwrap();
        assert_eq!(table.entry(), "q1");
        assert!(table.question("q1").is_some());
        assert!(table.result("r_yes").is_some());
    }

    #[test]
    fn test_unknown_entry_rejected() {
        let err = DecisionTable::new(
            "test",
            "q9",
            vec![question("q1", "?", "", None, None, "")],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::UnknownEntry { .. }));
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let err = DecisionTable::new(
            "test",
            "q1",
            vec![question("q1", "?", "", Some("q_missing"), None, "")],
            vec![],
        )
        .unwrap_err();
        match err {
            TableError::DanglingEdge { answer, target, .. } => {
                assert_eq!(answer, Answer::Yes);
                assert_eq!(target, "q_missing");
            }
            other => panic!("expected dangling edge, got {other:?}"),
        }
    }

    #[test]
    fn test_cycle_rejected() {
        let err = DecisionTable::new(
            "test",
            "q1",
            vec![
                question("q1", "?", "", Some("q2"), None, ""),
                question("q2", "?", "", Some("q1"), None, ""),
            ],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::Cycle { .. }));
    }

    #[test]
    fn test_self_loop_rejected() {
        let err = DecisionTable::new(
            "test",
            "q1",
            vec![question("q1", "?", "", Some("q1"), None, "")],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::Cycle { .. }));
    }

    #[test]
    fn test_unreachable_node_rejected() {
        let err = DecisionTable::new(
            "test",
            "q1",
            vec![
                question("q1", "?", "", Some("r_done"), Some("r_done"), ""),
                question("q_orphan", "?", "", Some("r_done"), None, ""),
            ],
            vec![result("r_done", "Done", ResultKind::Info, "")],
        )
        .unwrap_err();
        match err {
            TableError::Unreachable { id, .. } => assert_eq!(id, "q_orphan"),
            other => panic!("expected unreachable, got {other:?}"),
        }
    }

    #[test]
    fn test_ambiguous_id_rejected() {
        let err = DecisionTable::new(
            "test",
            "q1",
            vec![question("q1", "?", "", Some("q1x"), None, "")],
            vec![result("q1", "Shadow", ResultKind::Info, "")],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::AmbiguousId { .. }));
    }
}
