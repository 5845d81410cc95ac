use std::sync::{Arc, Mutex};
use std::time::Duration;

use compositions_core::{GameResult, Level, ProgressSnapshot, Question, QuestionGenerator};
use tracing::info;

use super::service::{AnswerOutcome, GameSession, SessionPhase};
use super::signals::GameSignals;
use crate::countdown::{Countdown, CountdownHandler};
use crate::error::SessionError;
use crate::game_settings_service::SettingsProvider;
use crate::observable::lock;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Drives a `GameSession` with a real countdown.
///
/// The session sits behind one mutex shared with the countdown task, so
/// ticks and answers are applied one at a time in arrival order. Signal
/// listeners run while that mutex is held and must not call back into the
/// controller. A tick that arrives meanwhile blocks its tokio worker on the
/// mutex until the listeners return, so listeners should stay short.
///
/// Dropping the controller tears the game down and stops the countdown.
pub struct GameController {
    session: Arc<Mutex<GameSession>>,
    signals: Arc<GameSignals>,
    settings: Arc<dyn SettingsProvider>,
    countdown: Option<Countdown>,
}

impl GameController {
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsProvider>, generator: QuestionGenerator) -> Self {
        Self::with_session(
            settings,
            GameSession::new(generator, Arc::new(GameSignals::new())),
        )
    }

    /// Wrap a preconfigured, idle session.
    #[must_use]
    pub fn with_session(settings: Arc<dyn SettingsProvider>, session: GameSession) -> Self {
        let signals = Arc::clone(session.signals());
        Self {
            session: Arc::new(Mutex::new(session)),
            signals,
            settings,
            countdown: None,
        }
    }

    /// Signals to observe. Subscribe before `start` to see the first question.
    #[must_use]
    pub fn signals(&self) -> Arc<GameSignals> {
        Arc::clone(&self.signals)
    }

    /// Load the level's settings, start the game and its countdown.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyStarted` on a second call,
    /// `SessionError::Question` for settings that cannot produce questions and
    /// `SessionError::Countdown` outside a runtime (the session is then
    /// abandoned).
    pub fn start(&mut self, level: Level) -> Result<(), SessionError> {
        let settings = self.settings.game_settings(level);
        let total = Duration::from_secs(u64::from(settings.game_time_secs()));

        // Hold the lock until the countdown exists so the first tick cannot
        // reach the session before it is running.
        let mut session = lock(&self.session);
        session.start(level, settings)?;

        let clock = SessionClock {
            session: Arc::clone(&self.session),
        };
        match Countdown::start(total, TICK_PERIOD, clock) {
            Ok(countdown) => {
                self.countdown = Some(countdown);
                Ok(())
            }
            Err(err) => {
                session.abandon();
                Err(err.into())
            }
        }
    }

    /// Submit the player's pick for the current question.
    ///
    /// # Errors
    ///
    /// See [`GameSession::submit_answer`].
    pub fn submit_answer(&self, answer: u32) -> Result<AnswerOutcome, SessionError> {
        lock(&self.session).submit_answer(answer)
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        lock(&self.session).phase()
    }

    #[must_use]
    pub fn progress(&self) -> Option<ProgressSnapshot> {
        lock(&self.session).progress()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<Question> {
        lock(&self.session).current_question().cloned()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        lock(&self.session).remaining_secs()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        lock(&self.session).result().cloned()
    }

    /// True while the countdown task is alive.
    #[must_use]
    pub fn is_counting_down(&self) -> bool {
        self.countdown.as_ref().is_some_and(Countdown::is_running)
    }

    /// Stop the countdown and end the game without a result.
    ///
    /// Idempotent; a game that already finished keeps its result.
    pub fn teardown(&mut self) {
        if let Some(mut countdown) = self.countdown.take() {
            countdown.cancel();
        }
        let mut session = lock(&self.session);
        if session.phase() == SessionPhase::Running {
            info!("game torn down before time ran out");
        }
        session.abandon();
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        self.teardown();
    }
}

struct SessionClock {
    session: Arc<Mutex<GameSession>>,
}

impl CountdownHandler for SessionClock {
    fn on_tick(&self, remaining: Duration) {
        let remaining_secs = u32::try_from(remaining.as_secs()).unwrap_or(u32::MAX);
        lock(&self.session).on_tick(remaining_secs);
    }

    fn on_expire(&self) {
        lock(&self.session).on_expire();
    }
}
