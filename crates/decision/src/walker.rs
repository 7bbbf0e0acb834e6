//! Table walker
//!
//! Steps through a validated table one answer at a time, recording the path.
//! Validation guarantees termination, so a fixed answer sequence always
//! reaches the same position and `reset` reproduces a walk exactly.

use thiserror::Error;

use crate::graph::{Answer, DecisionTable, QuestionNode, ResultNode};

/// Where a walk currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position<'t> {
    /// Awaiting an answer to this question
    Question(&'t QuestionNode),
    /// Terminal determination reached
    Determination(&'t ResultNode),
    /// Terminal edge with no determination payload
    Complete,
}

impl Position<'_> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Position::Question(_))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalkError {
    #[error("The walk has already reached a terminal position")]
    Finished,
}

/// One walk over a decision table
pub struct Walker<'t> {
    table: &'t DecisionTable,
    /// Current question id, `None` once terminal
    current: Option<String>,
    /// Terminal result id when the walk ended at a determination
    outcome: Option<String>,
    history: Vec<(String, Answer)>,
}

impl<'t> Walker<'t> {
    /// Start a walk at the table's entry question
    pub fn new(table: &'t DecisionTable) -> Self {
        Self {
            table,
            current: Some(table.entry().to_string()),
            outcome: None,
            history: Vec::new(),
        }
    }

    /// The walk's current position
    pub fn position(&self) -> Position<'t> {
        if let Some(ref id) = self.current {
            // Load-time validation guarantees the id resolves.
            if let Some(question) = self.table.question(id) {
                return Position::Question(question);
            }
        }
        match self.outcome.as_deref().and_then(|id| self.table.result(id)) {
            Some(result) => Position::Determination(result),
            None => Position::Complete,
        }
    }

    /// Answer the current question and move to the next position
    pub fn answer(&mut self, answer: Answer) -> Result<Position<'t>, WalkError> {
        let id = self.current.clone().ok_or(WalkError::Finished)?;
        let question = self.table.question(&id).ok_or(WalkError::Finished)?;

        self.history.push((id, answer));
        match question.next(answer) {
            Some(next) if self.table.question(next).is_some() => {
                self.current = Some(next.to_string());
            }
            Some(next) => {
                // Not a question id, so validation says it is a result id.
                tracing::debug!(table = %self.table.name(), result = %next, "walk reached determination");
                self.current = None;
                self.outcome = Some(next.to_string());
            }
            None => {
                self.current = None;
                self.outcome = None;
            }
        }
        Ok(self.position())
    }

    /// Return to the entry question, clearing the recorded path
    pub fn reset(&mut self) {
        self.current = Some(self.table.entry().to_string());
        self.outcome = None;
        self.history.clear();
    }

    /// The (question id, answer) pairs taken so far, in order
    pub fn history(&self) -> &[(String, Answer)] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{question, result, ResultKind};

    fn table() -> DecisionTable {
        DecisionTable::new(
            "test",
            "q1",
            vec![
                question("q1", "First?", "", Some("q2"), Some("r_no"), ""),
                question("q2", "Second?", "", Some("r_yes"), None, ""),
            ],
            vec![
                result("r_yes", "Approved", ResultKind::Success, ""),
                result("r_no", "Denied", ResultKind::Error, ""),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_walk_to_determination() {
        let table = table();
        let mut walker = Walker::new(&table);

        assert!(matches!(walker.position(), Position::Question(q) if q.id == "q1"));
        walker.answer(Answer::Yes).unwrap();
        let end = walker.answer(Answer::Yes).unwrap();
        match end {
            Position::Determination(r) => assert_eq!(r.title, "Approved"),
            other => panic!("expected determination, got {other:?}"),
        }
        assert_eq!(walker.history().len(), 2);
    }

    #[test]
    fn test_absent_edge_completes_without_payload() {
        let table = table();
        let mut walker = Walker::new(&table);
        walker.answer(Answer::Yes).unwrap();
        let end = walker.answer(Answer::No).unwrap();
        assert_eq!(end, Position::Complete);
    }

    #[test]
    fn test_answer_after_terminal_fails() {
        let table = table();
        let mut walker = Walker::new(&table);
        walker.answer(Answer::No).unwrap();
        assert!(walker.position().is_terminal());
        assert_eq!(walker.answer(Answer::Yes), Err(WalkError::Finished));
    }

    #[test]
    fn test_reset_reproduces_walk_exactly() {
        let table = table();
        let mut walker = Walker::new(&table);

        let first = walker.answer(Answer::Yes).unwrap();
        let first_end = walker.answer(Answer::Yes).unwrap();

        walker.reset();
        assert!(walker.history().is_empty());
        let second = walker.answer(Answer::Yes).unwrap();
        let second_end = walker.answer(Answer::Yes).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_end, second_end);
    }
}
