use serde::Serialize;

use trivia_core::model::{Feedback, Question, Session, SessionStatus};

/// The fields of the active question a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub category: String,
    pub question_text: String,
    pub answer_choices: Vec<String>,
}

impl QuestionView {
    fn from_question(question: &Question) -> Self {
        Self {
            category: question.category().to_string(),
            question_text: question.question_text().to_string(),
            answer_choices: question.answer_choices().to_vec(),
        }
    }
}

/// Presentation-agnostic snapshot of the engine state.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no layout or styling assumptions
///
/// A renderer draws whatever snapshot it last took and forwards the
/// player's selection back through `QuizEngine::submit_answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineView {
    pub status: SessionStatus,
    /// 1-based position of the current question, while one is active.
    pub current_index: Option<usize>,
    pub score: usize,
    pub total_questions: usize,
    pub question: Option<QuestionView>,
    pub feedback: Option<Feedback>,
}

impl EngineView {
    pub(crate) fn from_session(session: &Session) -> Self {
        Self {
            status: session.status(),
            current_index: session.current_index(),
            score: session.score(),
            total_questions: session.total_questions(),
            question: session.current_question().map(QuestionView::from_question),
            feedback: session.pending_feedback().cloned(),
        }
    }
}
