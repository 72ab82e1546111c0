#![forbid(unsafe_code)]

pub mod controller;
pub mod error;
pub mod shuffle;
pub mod source;
pub mod timer;
mod view;

pub use trivia_core::Clock;
pub use trivia_core::model::{Feedback, Question, QuestionId, SessionStatus};

pub use controller::{FEEDBACK_DELAY, QuizEngine};
pub use error::{EngineError, FetchError};
pub use source::{BatchRequest, Difficulty, OpenTriviaSource, QuestionKind, QuestionSource};
pub use timer::FeedbackTimer;
pub use view::{EngineView, QuestionView};
