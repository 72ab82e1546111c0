use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use engine::{
    BatchRequest, Difficulty, EngineView, Feedback, OpenTriviaSource, QuestionKind, QuizEngine,
    SessionStatus,
};
use log::debug;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidAmount { raw: String },
    InvalidCategory { raw: String },
    InvalidDifficulty { raw: String },
    InvalidKind { raw: String },
    InvalidDelay { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidAmount { raw } => write!(f, "invalid --amount value: {raw}"),
            ArgsError::InvalidCategory { raw } => write!(f, "invalid --category value: {raw}"),
            ArgsError::InvalidDifficulty { raw } => {
                write!(f, "invalid --difficulty value: {raw} (easy|medium|hard)")
            }
            ArgsError::InvalidKind { raw } => {
                write!(f, "invalid --type value: {raw} (multiple|boolean)")
            }
            ArgsError::InvalidDelay { raw } => write!(f, "invalid --delay-ms value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    request: BatchRequest,
    delay: Duration,
    api_url: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --amount <n>                questions per game (default 10)");
    eprintln!("  --category <id>             provider category id (default 18)");
    eprintln!("  --difficulty <easy|medium|hard>   (default medium)");
    eprintln!("  --type <multiple|boolean>         (default multiple)");
    eprintln!("  --delay-ms <n>              feedback display time (default 2000)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_API_URL              alternate provider endpoint");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut request = BatchRequest::default();
        let mut delay = engine::FEEDBACK_DELAY;
        let api_url = std::env::var("TRIVIA_API_URL").ok();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--amount" => {
                    let value = require_value(args, "--amount")?;
                    request.amount = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidAmount { raw: value.clone() })?;
                }
                "--category" => {
                    let value = require_value(args, "--category")?;
                    request.category = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidCategory { raw: value.clone() })?;
                }
                "--difficulty" => {
                    let value = require_value(args, "--difficulty")?;
                    request.difficulty = Difficulty::from_arg(&value)
                        .ok_or(ArgsError::InvalidDifficulty { raw: value })?;
                }
                "--type" => {
                    let value = require_value(args, "--type")?;
                    request.kind =
                        QuestionKind::from_arg(&value).ok_or(ArgsError::InvalidKind { raw: value })?;
                }
                "--delay-ms" => {
                    let value = require_value(args, "--delay-ms")?;
                    let millis: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDelay { raw: value.clone() })?;
                    delay = Duration::from_millis(millis);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            request,
            delay,
            api_url,
        })
    }
}

fn read_line() -> Result<String, Box<dyn std::error::Error>> {
    let mut line = String::new();
    let read = std::io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Err("stdin closed".into());
    }
    Ok(line.trim().to_string())
}

fn render_question(view: &EngineView) {
    let Some(question) = &view.question else {
        return;
    };
    let index = view.current_index.unwrap_or(0);

    println!();
    println!(
        "Quiz: {index}/{}    Category: {}    Score: {}",
        view.total_questions, question.category, view.score
    );
    println!("{}", question.question_text);
    for (position, choice) in question.answer_choices.iter().enumerate() {
        println!("  {}) {choice}", position + 1);
    }
}

fn render_feedback(feedback: &Feedback) {
    if feedback.is_correct {
        println!("Nice! Your answer was correct.");
    } else {
        println!("Wrong! The correct answer is {}.", feedback.revealed_answer);
    }
}

/// Prompt until the player picks one of the numbered choices.
fn read_choice(view: &EngineView) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let Some(question) = &view.question else {
        return Ok(None);
    };
    let count = question.answer_choices.len();

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let line = read_line()?;
        match line.parse::<usize>() {
            Ok(pick) if (1..=count).contains(&pick) => {
                return Ok(Some(question.answer_choices[pick - 1].clone()));
            }
            _ => eprintln!("enter a number between 1 and {count}"),
        }
    }
}

async fn wait_while_revealing(engine: &QuizEngine) {
    while engine.status() == SessionStatus::Feedback {
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    let mut source = OpenTriviaSource::new();
    if let Some(url) = args.api_url {
        source = source.with_base_url(url);
    }
    let engine = QuizEngine::new(Arc::new(source), args.request).with_feedback_delay(args.delay);

    println!("Basic Quiz Game!");
    println!("Press Enter to play.");
    read_line()?;

    engine.start().await?;
    debug!("fetched {} questions", engine.view().total_questions);

    loop {
        let view = engine.view();
        match view.status {
            SessionStatus::Playing => {
                render_question(&view);
                let Some(choice) = read_choice(&view)? else {
                    continue;
                };
                if let Some(feedback) = engine.submit_answer(&choice) {
                    render_feedback(&feedback);
                }
                wait_while_revealing(&engine).await;
            }
            SessionStatus::GameOver => {
                println!();
                println!("Your score is: {} out of {}", view.score, view.total_questions);
                print!("Play again? [y/N] ");
                std::io::stdout().flush()?;
                if !read_line()?.eq_ignore_ascii_case("y") {
                    break;
                }
                engine.start().await?;
            }
            SessionStatus::Idle | SessionStatus::Feedback => {
                tokio::time::sleep(Duration::from_millis(25)).await;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
