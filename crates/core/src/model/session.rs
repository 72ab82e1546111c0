use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::{Question, ScoreTracker};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
}

/// Lifecycle of a single play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    /// No game running; the question batch is empty.
    Idle,
    /// A question is on display and awaiting an answer.
    Playing,
    /// The last answer has been judged and the reveal is on display.
    Feedback,
    /// All questions judged; score and batch are frozen for display.
    GameOver,
}

/// Correctness reveal shown during the feedback window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub is_correct: bool,
    pub revealed_answer: String,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz play-through over a fixed question batch.
///
/// The session is a pure state machine: it never does I/O and never
/// schedules anything. The controller feeds it answer submissions and
/// feedback-timer expirations as discrete steps.
///
/// A fresh `Session` replaces the previous one on every restart, so no
/// two play-throughs ever share a score or question cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    status: SessionStatus,
    questions: Vec<Question>,
    cursor: usize,
    tracker: ScoreTracker,
    pending_feedback: Option<Feedback>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Session {
    /// An idle session with no questions, the state before any game starts.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            status: SessionStatus::Idle,
            questions: Vec::new(),
            cursor: 0,
            tracker: ScoreTracker::new(),
            pending_feedback: None,
            started_at: None,
            completed_at: None,
        }
    }

    /// Start playing over a freshly fetched batch.
    ///
    /// `started_at` should come from the engine clock to keep time
    /// deterministic in tests.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the batch holds no questions.
    pub fn begin(
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            status: SessionStatus::Playing,
            questions,
            cursor: 0,
            tracker: ScoreTracker::new(),
            pending_feedback: None,
            started_at: Some(started_at),
            completed_at: None,
        })
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.tracker.score()
    }

    #[must_use]
    pub fn pending_feedback(&self) -> Option<&Feedback> {
        self.pending_feedback.as_ref()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// The question currently on display, while playing or revealing.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.status {
            SessionStatus::Playing | SessionStatus::Feedback => self.questions.get(self.cursor),
            SessionStatus::Idle | SessionStatus::GameOver => None,
        }
    }

    /// 1-based position of the current question, in `[1, total]` while
    /// playing or revealing.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.status {
            SessionStatus::Playing | SessionStatus::Feedback => Some(self.cursor + 1),
            SessionStatus::Idle | SessionStatus::GameOver => None,
        }
    }

    /// Number of questions already judged.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        match self.status {
            SessionStatus::Idle => 0,
            SessionStatus::Playing => self.cursor,
            SessionStatus::Feedback => self.cursor + 1,
            SessionStatus::GameOver => self.questions.len(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.questions.len().saturating_sub(self.answered_count())
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == SessionStatus::GameOver
    }

    /// Judge the submitted choice against the current question.
    ///
    /// Each question is judged exactly once: outside `Playing` this is a
    /// no-op returning `None`, which guards against double submission
    /// during the feedback window. On a judgment the session moves to
    /// `Feedback`; the score for a correct final answer is counted here,
    /// before the terminal transition in [`Session::clear_feedback`].
    pub fn submit_answer(&mut self, choice: &str) -> Option<&Feedback> {
        if self.status != SessionStatus::Playing {
            return None;
        }
        let question = self.questions.get(self.cursor)?;

        let is_correct = ScoreTracker::evaluate(question, choice);
        if is_correct {
            self.tracker.increment();
        }

        self.pending_feedback = Some(Feedback {
            is_correct,
            revealed_answer: question.correct_answer().to_string(),
        });
        self.status = SessionStatus::Feedback;
        self.pending_feedback.as_ref()
    }

    /// End the feedback window and advance to the next question.
    ///
    /// Driven by the feedback timer. Past the last question the session
    /// becomes `GameOver` and `completed_at` is stamped with `now`.
    /// Outside `Feedback` this is a no-op.
    pub fn clear_feedback(&mut self, now: DateTime<Utc>) -> SessionStatus {
        if self.status != SessionStatus::Feedback {
            return self.status;
        }

        self.pending_feedback = None;
        self.cursor += 1;
        if self.cursor >= self.questions.len() {
            self.status = SessionStatus::GameOver;
            self.completed_at = Some(now);
        } else {
            self.status = SessionStatus::Playing;
        }
        self.status
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::idle()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
