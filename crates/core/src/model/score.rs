use crate::model::Question;

/// Running count of correctly answered questions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTracker {
    correct: usize,
}

impl ScoreTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact string comparison against the question's correct answer.
    ///
    /// No case folding and no whitespace trimming: the provider text is
    /// opaque and the submitted choice is expected verbatim.
    #[must_use]
    pub fn evaluate(question: &Question, submitted: &str) -> bool {
        submitted == question.correct_answer()
    }

    pub fn increment(&mut self) {
        self.correct += 1;
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.correct
    }
}
