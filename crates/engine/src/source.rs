use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;

use trivia_core::model::{Question, QuestionError, QuestionId};

use crate::error::FetchError;
use crate::shuffle::shuffled_choices;

/// Default endpoint of the Open Trivia DB question provider.
pub const DEFAULT_BASE_URL: &str = "https://opentdb.com/api.php";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Multiple choice, one correct answer plus several incorrect ones.
    Multiple,
    /// True/false, one correct answer plus one incorrect one.
    Boolean,
}

impl QuestionKind {
    #[must_use]
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "multiple" => Some(Self::Multiple),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Multiple => "multiple",
            Self::Boolean => "boolean",
        }
    }
}

/// Filters for one batch fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub amount: u8,
    pub category: u32,
    pub difficulty: Difficulty,
    pub kind: QuestionKind,
}

impl Default for BatchRequest {
    /// Ten medium multiple-choice questions from the Computer Science
    /// category, the classic quick-game setup.
    fn default() -> Self {
        Self {
            amount: 10,
            category: 18,
            difficulty: Difficulty::Medium,
            kind: QuestionKind::Multiple,
        }
    }
}

/// Fetches one normalized batch of questions per session start.
///
/// Batches are all-or-nothing: a transport or decode failure yields no
/// questions at all. The source never touches session state.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch and normalize a batch matching the request filters.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the provider is unreachable, answers
    /// with a non-success status, or returns an undecodable or
    /// inconsistent body.
    async fn fetch_batch(&self, request: &BatchRequest) -> Result<Vec<Question>, FetchError>;
}

//
// ─── OPEN TRIVIA DB ────────────────────────────────────────────────────────────
//

/// `QuestionSource` backed by an Open Trivia DB-compatible HTTP endpoint.
#[derive(Clone, Debug)]
pub struct OpenTriviaSource {
    client: Client,
    base_url: String,
}

impl OpenTriviaSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the source at a different endpoint, e.g. a local stub.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for OpenTriviaSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionSource for OpenTriviaSource {
    async fn fetch_batch(&self, request: &BatchRequest) -> Result<Vec<Question>, FetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("amount", request.amount.to_string()),
                ("category", request.category.to_string()),
                ("difficulty", request.difficulty.as_query().to_string()),
                ("type", request.kind.as_query().to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        let batch: ProviderBatch = serde_json::from_str(&body)?;

        let mut rng = rand::rng();
        Ok(normalize_batch(batch.results, &mut rng)?)
    }
}

/// Turn raw provider items into `Question`s.
///
/// Ids are assigned 1-based in batch order; the answer choices combine
/// the incorrect answers with the correct one in a randomized order
/// fixed here, once, for the lifetime of the question.
fn normalize_batch<R: Rng + ?Sized>(
    results: Vec<ProviderQuestion>,
    rng: &mut R,
) -> Result<Vec<Question>, QuestionError> {
    results
        .into_iter()
        .enumerate()
        .map(|(position, item)| {
            let id = u32::try_from(position + 1).unwrap_or(u32::MAX);
            let choices = shuffled_choices(&item.correct_answer, &item.incorrect_answers, rng);
            Question::new(
                QuestionId::new(id),
                item.category,
                item.question,
                item.correct_answer,
                choices,
            )
        })
        .collect()
}

//
// ─── WIRE FORMAT ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct ProviderBatch {
    results: Vec<ProviderQuestion>,
}

#[derive(Debug, Deserialize)]
struct ProviderQuestion {
    category: String,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}
