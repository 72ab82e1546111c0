use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique identifier for a Question within one session.
///
/// Ids are assigned sequentially from 1 in batch order by the question
/// source, so they double as the display position of the question.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(u32);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("answer choices do not contain the correct answer")]
    MissingCorrectAnswer,

    #[error("correct answer appears {count} times in the answer choices")]
    DuplicatedCorrectAnswer { count: usize },
}

/// A single normalized trivia question.
///
/// Immutable once created: `answer_choices` holds the correct answer
/// exactly once plus every incorrect answer, in a display order fixed
/// at creation time and never re-shuffled afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    category: String,
    question_text: String,
    correct_answer: String,
    answer_choices: Vec<String>,
}

impl Question {
    /// Create a question from already-randomized answer choices.
    ///
    /// Category, prompt and answer text are treated as opaque strings
    /// and copied verbatim from the provider.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::MissingCorrectAnswer` if `answer_choices`
    /// does not contain `correct_answer`, and
    /// `QuestionError::DuplicatedCorrectAnswer` if it contains it more
    /// than once.
    pub fn new(
        id: QuestionId,
        category: impl Into<String>,
        question_text: impl Into<String>,
        correct_answer: impl Into<String>,
        answer_choices: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let correct_answer = correct_answer.into();
        let occurrences = answer_choices
            .iter()
            .filter(|choice| **choice == correct_answer)
            .count();
        match occurrences {
            0 => return Err(QuestionError::MissingCorrectAnswer),
            1 => {}
            count => return Err(QuestionError::DuplicatedCorrectAnswer { count }),
        }

        Ok(Self {
            id,
            category: category.into(),
            question_text: question_text.into(),
            correct_answer,
            answer_choices,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Answer choices in their fixed display order.
    #[must_use]
    pub fn answer_choices(&self) -> &[String] {
        &self.answer_choices
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn choices(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn question_keeps_choice_order() {
        let question = Question::new(
            QuestionId::new(1),
            "Geography",
            "Capital of France?",
            "Paris",
            choices(&["Rome", "Paris", "Madrid"]),
        )
        .unwrap();

        assert_eq!(question.answer_choices(), choices(&["Rome", "Paris", "Madrid"]));
        assert_eq!(question.correct_answer(), "Paris");
    }

    #[test]
    fn question_requires_correct_answer_among_choices() {
        let err = Question::new(
            QuestionId::new(1),
            "Geography",
            "Capital of France?",
            "Paris",
            choices(&["Rome", "Madrid"]),
        )
        .unwrap_err();

        assert_eq!(err, QuestionError::MissingCorrectAnswer);
    }

    #[test]
    fn question_rejects_duplicated_correct_answer() {
        let err = Question::new(
            QuestionId::new(1),
            "Geography",
            "Capital of France?",
            "Paris",
            choices(&["Paris", "Rome", "Paris"]),
        )
        .unwrap_err();

        assert_eq!(err, QuestionError::DuplicatedCorrectAnswer { count: 2 });
    }

    #[test]
    fn comparison_is_exact_not_normalized() {
        // "paris" differs from "Paris"; the model stores both untouched.
        let err = Question::new(
            QuestionId::new(1),
            "Geography",
            "Capital of France?",
            "Paris",
            choices(&["paris", "Rome"]),
        )
        .unwrap_err();

        assert_eq!(err, QuestionError::MissingCorrectAnswer);
    }
}
