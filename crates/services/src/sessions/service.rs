use std::fmt;
use std::sync::Arc;

use compositions_core::time::format_seconds;
use compositions_core::{
    GameResult, GameSettings, Level, OPTION_COUNT, ProgressSnapshot, Question, QuestionGenerator,
    Score,
};
use tracing::{debug, info};

use super::signals::{GameSignals, format_progress};
use crate::error::SessionError;

/// Lifecycle of a game session. Moves strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Finished,
}

/// What happened to a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// No question was active (not started yet, or already finished).
    Ignored,
    Recorded {
        correct: bool,
        progress: ProgressSnapshot,
    },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Round, timer and scoring state of one game.
///
/// This is the synchronous core: it never reads a clock. Whoever drives it
/// reports time through `on_tick` and `on_expire`; every change is pushed to
/// the shared `GameSignals`.
pub struct GameSession {
    phase: SessionPhase,
    level: Option<Level>,
    settings: Option<GameSettings>,
    generator: QuestionGenerator,
    option_count: usize,
    score: Score,
    remaining_secs: u32,
    question: Option<Question>,
    result: Option<GameResult>,
    signals: Arc<GameSignals>,
}

impl GameSession {
    #[must_use]
    pub fn new(generator: QuestionGenerator, signals: Arc<GameSignals>) -> Self {
        Self {
            phase: SessionPhase::Idle,
            level: None,
            settings: None,
            generator,
            option_count: OPTION_COUNT,
            score: Score::new(),
            remaining_secs: 0,
            question: None,
            result: None,
            signals,
        }
    }

    /// Override how many options each question offers.
    #[must_use]
    pub fn with_option_count(mut self, option_count: usize) -> Self {
        self.option_count = option_count;
        self
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    #[must_use]
    pub fn settings(&self) -> Option<&GameSettings> {
        self.settings.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn signals(&self) -> &Arc<GameSignals> {
        &self.signals
    }

    /// Current progress against the thresholds, once started.
    #[must_use]
    pub fn progress(&self) -> Option<ProgressSnapshot> {
        self.settings
            .as_ref()
            .map(|settings| self.score.evaluate(settings))
    }

    /// Begin the game: reset the score, publish the first question and the
    /// initial progress.
    ///
    /// The caller is responsible for starting a clock that reports to
    /// `on_tick` / `on_expire`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyStarted` unless the session is idle, and
    /// `SessionError::Question` if the settings cannot produce questions with
    /// the configured option count.
    pub fn start(&mut self, level: Level, settings: GameSettings) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Idle {
            return Err(SessionError::AlreadyStarted);
        }
        let first = self
            .generator
            .generate(settings.max_sum_value(), self.option_count)?;

        info!(
            %level,
            game_time_secs = settings.game_time_secs(),
            max_sum = settings.max_sum_value(),
            "game started"
        );

        self.level = Some(level);
        self.score = Score::new();
        self.remaining_secs = settings.game_time_secs();
        self.signals
            .min_percent
            .set(settings.min_percent_of_right_answers());
        self.settings = Some(settings);
        self.phase = SessionPhase::Running;

        self.show_question(first);
        self.publish_progress();
        Ok(())
    }

    /// Record remaining time reported by the clock.
    ///
    /// Returns `false` (and publishes nothing) unless the game is running.
    pub fn on_tick(&mut self, remaining_secs: u32) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.remaining_secs = remaining_secs;
        self.signals
            .formatted_time
            .set(format_seconds(u64::from(remaining_secs)));
        true
    }

    /// Time ran out: compute and publish the result.
    ///
    /// Returns `None` unless the game was running, so a result is produced at
    /// most once.
    pub fn on_expire(&mut self) -> Option<GameResult> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        let settings = self.settings.clone()?;
        self.phase = SessionPhase::Finished;
        self.remaining_secs = 0;

        let result = GameResult::from_score(&self.score, settings);
        info!(
            winner = result.winner,
            right_answers = result.count_of_right_answers,
            questions = result.count_of_questions,
            "game finished"
        );
        self.result = Some(result.clone());
        self.signals.game_result.set(result.clone());
        Some(result)
    }

    /// Check an answer against the current question, publish progress and
    /// move on to a new question.
    ///
    /// Answers outside a running game are ignored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Question` if the next question cannot be
    /// generated; `start` already rules this out for the active settings.
    pub fn submit_answer(&mut self, answer: u32) -> Result<AnswerOutcome, SessionError> {
        let Some(question) = self.question.as_ref().filter(|_| self.phase == SessionPhase::Running)
        else {
            debug!(answer, phase = ?self.phase, "answer ignored");
            return Ok(AnswerOutcome::Ignored);
        };
        let correct = question.is_right(answer);

        self.score.record(correct);
        let Some(progress) = self.publish_progress() else {
            return Ok(AnswerOutcome::Ignored);
        };
        debug!(
            answer,
            correct,
            right_answers = progress.right_answers,
            questions = progress.total_questions,
            "answer recorded"
        );

        self.next_question()?;
        Ok(AnswerOutcome::Recorded { correct, progress })
    }

    /// Stop without a result, e.g. when the player leaves mid-game.
    pub fn abandon(&mut self) {
        if self.phase != SessionPhase::Finished {
            debug!(phase = ?self.phase, "session abandoned");
            self.phase = SessionPhase::Finished;
        }
    }

    fn next_question(&mut self) -> Result<(), SessionError> {
        let Some(max_sum) = self.settings.as_ref().map(GameSettings::max_sum_value) else {
            return Ok(());
        };
        let question = self.generator.generate(max_sum, self.option_count)?;
        self.show_question(question);
        Ok(())
    }

    fn show_question(&mut self, question: Question) {
        self.question = Some(question.clone());
        self.signals.question.set(question);
    }

    fn publish_progress(&self) -> Option<ProgressSnapshot> {
        let settings = self.settings.as_ref()?;
        let progress = self.score.evaluate(settings);

        self.signals.percent_of_right_answers.set(progress.percent);
        self.signals.progress_answers.set(format_progress(
            progress.right_answers,
            settings.min_count_of_right_answers(),
        ));
        self.signals
            .enough_count_of_right_answers
            .set(progress.enough_count);
        self.signals
            .enough_percent_of_right_answers
            .set(progress.enough_percent);
        self.signals.progress.set(progress);
        Some(progress)
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("phase", &self.phase)
            .field("level", &self.level)
            .field("score", &self.score)
            .field("remaining_secs", &self.remaining_secs)
            .field("has_question", &self.question.is_some())
            .field("has_result", &self.result.is_some())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
