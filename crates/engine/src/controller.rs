use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::warn;

use trivia_core::Clock;
use trivia_core::model::{Feedback, Session, SessionStatus};

use crate::error::EngineError;
use crate::source::{BatchRequest, QuestionSource};
use crate::timer::FeedbackTimer;
use crate::view::EngineView;

/// How long the correctness reveal stays on display before advancing.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

//
// ─── QUIZ ENGINE ───────────────────────────────────────────────────────────────
//

struct EngineState {
    session: Session,
    /// Bumped on every `start`. Timer callbacks and in-flight fetches
    /// carry the generation they were created under and become inert
    /// once it no longer matches.
    generation: u64,
    timer: FeedbackTimer,
}

/// The session controller: owns the `Session`, drives the play /
/// feedback / game-over state machine, and schedules the feedback
/// window.
///
/// All transitions run as discrete steps under one lock, which is never
/// held across an await. The only suspend point is the batch fetch in
/// [`QuizEngine::start`].
pub struct QuizEngine {
    source: Arc<dyn QuestionSource>,
    request: BatchRequest,
    clock: Clock,
    feedback_delay: Duration,
    state: Arc<Mutex<EngineState>>,
}

impl QuizEngine {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, request: BatchRequest) -> Self {
        Self {
            source,
            request,
            clock: Clock::default_clock(),
            feedback_delay: FEEDBACK_DELAY,
            state: Arc::new(Mutex::new(EngineState {
                session: Session::idle(),
                generation: 0,
                timer: FeedbackTimer::new(),
            })),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    /// Start a fresh play-through, replacing whatever came before.
    ///
    /// Any armed feedback timer is cancelled and the previous session is
    /// discarded before the fetch. If a restart overtakes an in-flight
    /// fetch, the slower fetch's batch is thrown away.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Fetch` when the provider call fails,
    /// `EngineError::Session` when the batch is empty, and
    /// `EngineError::Stale` when a newer `start` superseded this one.
    /// In every failure case the session is left idle with no questions.
    pub async fn start(&self) -> Result<(), EngineError> {
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.timer.cancel();
            state.session = Session::idle();
            state.generation
        };

        let questions = match self.source.fetch_batch(&self.request).await {
            Ok(questions) => questions,
            Err(err) => {
                warn!("question batch fetch failed: {err}");
                return Err(err.into());
            }
        };
        let session = Session::begin(questions, self.clock.now()).map_err(|err| {
            warn!("fetched batch could not start a session: {err}");
            err
        })?;

        let mut state = lock(&self.state);
        if state.generation != generation {
            return Err(EngineError::Stale);
        }
        state.session = session;
        Ok(())
    }

    /// Judge the submitted choice and open the feedback window.
    ///
    /// Returns the feedback that was recorded, or `None` when no
    /// question is awaiting an answer (idle, revealing, or game over) —
    /// a repeated submission is ignored, never re-scored.
    ///
    /// Must be called from within a Tokio runtime: the feedback window
    /// is closed by a spawned one-shot timer.
    pub fn submit_answer(&self, choice: &str) -> Option<Feedback> {
        let mut state = lock(&self.state);
        let feedback = state.session.submit_answer(choice)?.clone();

        let generation = state.generation;
        let shared = Arc::clone(&self.state);
        let clock = self.clock;
        state.timer.arm(self.feedback_delay, move || {
            let mut state = lock(&shared);
            if state.generation != generation {
                // Timer outlived its session; a restart already won.
                return;
            }
            state.session.clear_feedback(clock.now());
        });

        Some(feedback)
    }

    /// Snapshot of the current state for the presentation layer.
    #[must_use]
    pub fn view(&self) -> EngineView {
        EngineView::from_session(&lock(&self.state).session)
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        lock(&self.state).session.status()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        lock(&self.state).session.score()
    }
}

impl fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("QuizEngine")
            .field("request", &self.request)
            .field("feedback_delay", &self.feedback_delay)
            .field("status", &state.session.status())
            .field("generation", &state.generation)
            .finish_non_exhaustive()
    }
}

// The lock only guards plain state transitions; a poisoned lock still
// holds a coherent session, so recover the guard instead of panicking.
fn lock(state: &Mutex<EngineState>) -> MutexGuard<'_, EngineState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
