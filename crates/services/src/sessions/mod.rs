mod controller;
mod service;
mod signals;

// Public API of the game session subsystem.
pub use crate::error::SessionError;
pub use controller::GameController;
pub use service::{AnswerOutcome, GameSession, SessionPhase};
pub use signals::{GameSignals, format_progress};
