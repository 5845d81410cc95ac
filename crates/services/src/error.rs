//! Shared error types for the services crate.

use thiserror::Error;

use compositions_core::QuestionError;

/// Errors emitted by `Countdown`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CountdownError {
    #[error("countdown must be started from within a tokio runtime")]
    NoRuntime,
    #[error("countdown period must be > 0")]
    ZeroPeriod,
}

/// Errors emitted by game sessions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session already started")]
    AlreadyStarted,
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Countdown(#[from] CountdownError),
}
