use std::fmt;
use std::io::BufRead;
use std::sync::{Arc, Weak};

use compositions_core::{GameResult, Level, Question, QuestionGenerator};
use services::{AnswerOutcome, GameController, GameSignals, LevelSettings};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLevel { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLevel { raw } => write!(f, "invalid --level value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--level <level>] [--seed <u64>] [--json] [--verbose]");
    eprintln!();
    eprintln!("Levels: test, easy, normal, hard (default: easy)");
    eprintln!("Type the number that completes the sum and press enter.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COMPOSITIONS_LEVEL, COMPOSITIONS_SEED, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    level: Level,
    seed: Option<u64>,
    json: bool,
    verbose: bool,
}

impl Args {
    /// Returns `Ok(None)` when help was requested.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut level = env("COMPOSITIONS_LEVEL")
            .and_then(|value| value.parse::<Level>().ok())
            .unwrap_or(Level::Easy);
        let mut seed = env("COMPOSITIONS_SEED").and_then(|value| value.parse::<u64>().ok());
        let mut json = false;
        let mut verbose = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--level" => {
                    let value = require_value(args, "--level")?;
                    level = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidLevel { raw: value.clone() })?;
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--json" => json = true,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self {
            level,
            seed,
            json,
            verbose,
        }))
    }
}

fn init_tracing(verbose: bool) {
    // RUST_LOG wins; otherwise stay quiet so stdout remains the game screen.
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render_question(question: &Question, time_left: Option<&str>) -> String {
    let options = question
        .options()
        .iter()
        .map(|option| format!("[{option}]"))
        .collect::<Vec<_>>()
        .join(" ");
    let time_left = time_left.unwrap_or("--:--");
    format!(
        "[{time_left}]  {sum} = {visible} + ?   {options}",
        sum = question.sum(),
        visible = question.visible_number(),
    )
}

fn render_summary(result: &GameResult) -> String {
    let settings = &result.game_settings;
    let headline = if result.winner {
        "You won!"
    } else {
        "Time is up. Not this time."
    };
    [
        headline.to_string(),
        format!(
            "Required right answers: {}",
            settings.min_count_of_right_answers()
        ),
        format!(
            "Your score: {} of {} questions",
            result.count_of_right_answers, result.count_of_questions
        ),
        format!(
            "Required percent of right answers: {}%",
            settings.min_percent_of_right_answers()
        ),
        format!("Your percent of right answers: {}%", result.percent()),
    ]
    .join("\n")
}

/// Print game state as the signals change.
///
/// Listeners hold only a weak reference back to the signals so the
/// subscriptions do not keep them alive.
fn attach_printer(signals: &Arc<GameSignals>) {
    let weak: Weak<GameSignals> = Arc::downgrade(signals);
    signals.question.subscribe(move |question| {
        let time_left = weak
            .upgrade()
            .and_then(|signals| signals.formatted_time.get());
        println!("{}", render_question(question, time_left.as_deref()));
    });

    let weak = Arc::downgrade(signals);
    signals.progress_answers.subscribe(move |progress| {
        let Some(signals) = weak.upgrade() else {
            return;
        };
        let percent = signals.percent_of_right_answers.get().unwrap_or(0);
        let min_percent = signals.min_percent.get().unwrap_or(0);
        println!("  right answers: {progress}, {percent}% (need {min_percent}%)");
    });
}

fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    // A plain thread: tokio's stdin would keep the runtime alive on exit
    // until the player presses enter.
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn handle_line(game: &GameController, line: &str) -> Result<(), services::SessionError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(());
    }
    let Ok(answer) = line.parse::<u32>() else {
        println!("  type one of the numbers in brackets");
        return Ok(());
    };
    let expected = game.current_question().map(|question| question.right_answer());

    match game.submit_answer(answer)? {
        AnswerOutcome::Recorded { correct: true, .. } => println!("  right!"),
        AnswerOutcome::Recorded { correct: false, .. } => match expected {
            Some(expected) => println!("  wrong, it was {expected}"),
            None => println!("  wrong"),
        },
        AnswerOutcome::Ignored => {}
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let Some(args) = parsed else {
        print_usage();
        return Ok(());
    };

    init_tracing(args.verbose);
    tracing::debug!(level = %args.level, seed = ?args.seed, "starting game");

    let generator = args
        .seed
        .map_or_else(QuestionGenerator::from_os_rng, QuestionGenerator::seeded);
    let mut game = GameController::new(Arc::new(LevelSettings), generator);
    let signals = game.signals();

    if !args.json {
        attach_printer(&signals);
    }
    let (result_tx, mut results) = mpsc::unbounded_channel();
    signals.game_result.subscribe(move |result| {
        // The receiver only goes away once the game loop has ended.
        let _ = result_tx.send(result.clone());
    });

    let mut lines = spawn_stdin_reader();
    game.start(args.level)?;

    let result = loop {
        tokio::select! {
            biased;
            result = results.recv() => break result,
            line = lines.recv() => match line {
                Some(line) => handle_line(&game, &line)?,
                // Input closed: let the clock run out.
                None => break results.recv().await,
            },
        }
    };
    game.teardown();

    let result = result.ok_or("game ended without a result")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!("{}", render_summary(&result));
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
