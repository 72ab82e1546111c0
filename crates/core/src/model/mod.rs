mod question;
mod score;
mod session;

pub use question::{Question, QuestionError, QuestionId};
pub use score::ScoreTracker;
pub use session::{Feedback, Session, SessionError, SessionStatus};
