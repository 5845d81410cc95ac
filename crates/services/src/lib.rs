#![forbid(unsafe_code)]

pub mod countdown;
pub mod error;
pub mod game_settings_service;
pub mod observable;
pub mod sessions;

pub use countdown::{Countdown, CountdownHandler};
pub use error::{CountdownError, SessionError};
pub use game_settings_service::{FixedSettings, LevelSettings, SettingsProvider};
pub use observable::{ListenerId, Observable};
pub use sessions::{AnswerOutcome, GameController, GameSession, GameSignals, SessionPhase};
