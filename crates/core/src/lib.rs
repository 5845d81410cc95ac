#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod model;
pub mod time;

pub use error::Error;
pub use generator::{OPTION_COUNT, QuestionError, QuestionGenerator};
pub use model::{GameResult, GameSettings, Level, ProgressSnapshot, Question, Score};
