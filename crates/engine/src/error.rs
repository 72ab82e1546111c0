//! Shared error types for the engine crate.

use thiserror::Error;

use trivia_core::model::{QuestionError, SessionError};

/// Errors emitted by a question source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("question provider request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("question batch response could not be decoded: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("provider returned an inconsistent question: {0}")]
    Invalid(#[from] QuestionError),
}

/// Errors emitted by `QuizEngine`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("a restarted session replaced this fetch")]
    Stale,
}
