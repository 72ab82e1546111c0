use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use engine::{
    BatchRequest, Clock, FetchError, Question, QuestionId, QuestionSource, QuizEngine,
    SessionStatus,
};
use trivia_core::time::fixed_now;

/// Serves the same two-question quiz on every fetch, with ids restarting
/// at 1 like a real normalized batch.
struct FixedQuiz {
    fetches: AtomicU32,
}

fn question(id: u32, category: &str, text: &str, correct: &str, others: &[&str]) -> Question {
    let mut choices: Vec<String> = others.iter().map(|o| (*o).to_string()).collect();
    choices.push(correct.to_string());
    Question::new(QuestionId::new(id), category, text, correct, choices).unwrap()
}

#[async_trait]
impl QuestionSource for FixedQuiz {
    async fn fetch_batch(&self, _request: &BatchRequest) -> Result<Vec<Question>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(vec![
            question(1, "Geography", "Capital of France?", "Paris", &["Rome"]),
            question(2, "Art", "Color of the sky?", "Blue", &["Red", "Green"]),
        ])
    }
}

async fn let_feedback_window_pass() {
    // Virtual time: sleeping past the 2000 ms window runs the timer task.
    tokio::time::sleep(Duration::from_millis(2100)).await;
}

#[tokio::test(start_paused = true)]
async fn full_play_through_scores_and_ends() {
    let source = Arc::new(FixedQuiz {
        fetches: AtomicU32::new(0),
    });
    let engine = QuizEngine::new(source, BatchRequest::default())
        .with_clock(Clock::fixed(fixed_now()));

    engine.start().await.unwrap();
    let view = engine.view();
    assert_eq!(view.status, SessionStatus::Playing);
    assert_eq!(view.current_index, Some(1));
    assert_eq!(view.total_questions, 2);

    // Q1 answered correctly.
    let feedback = engine.submit_answer("Paris").unwrap();
    assert!(feedback.is_correct);
    let view = engine.view();
    assert_eq!(view.status, SessionStatus::Feedback);
    assert_eq!(view.score, 1);

    let_feedback_window_pass().await;
    let view = engine.view();
    assert_eq!(view.status, SessionStatus::Playing);
    assert_eq!(view.current_index, Some(2));
    assert!(view.feedback.is_none());

    // Q2 answered wrong: score stays, the reveal names the right answer.
    let feedback = engine.submit_answer("Green").unwrap();
    assert!(!feedback.is_correct);
    assert_eq!(feedback.revealed_answer, "Blue");
    assert_eq!(engine.score(), 1);

    let_feedback_window_pass().await;
    let view = engine.view();
    assert_eq!(view.status, SessionStatus::GameOver);
    assert_eq!(view.score, 1);
    assert_eq!(view.total_questions, 2);
    assert_eq!(view.current_index, None);
    assert!(view.question.is_none());
}

#[tokio::test(start_paused = true)]
async fn restart_fetches_a_new_batch_and_resets_the_score() {
    let source = Arc::new(FixedQuiz {
        fetches: AtomicU32::new(0),
    });
    let engine = QuizEngine::new(Arc::clone(&source) as Arc<dyn QuestionSource>, BatchRequest::default())
        .with_clock(Clock::fixed(fixed_now()));

    engine.start().await.unwrap();
    engine.submit_answer("Paris").unwrap();
    let_feedback_window_pass().await;
    engine.submit_answer("Blue").unwrap();
    let_feedback_window_pass().await;
    assert_eq!(engine.status(), SessionStatus::GameOver);
    assert_eq!(engine.score(), 2);

    // Play again from game over.
    engine.start().await.unwrap();
    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);

    let view = engine.view();
    assert_eq!(view.status, SessionStatus::Playing);
    assert_eq!(view.current_index, Some(1));
    assert_eq!(view.score, 0);
    assert!(view.feedback.is_none());
}
