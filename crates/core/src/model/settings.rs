use serde::Serialize;
use thiserror::Error;

use crate::model::Level;

/// Smallest sum a question can ask for: `1 + 1`.
pub const MIN_SUM_VALUE: u32 = 2;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("game time must be > 0 seconds")]
    InvalidGameTime,

    #[error("minimum percent of right answers must be <= 100, got {0}")]
    InvalidMinPercent(u32),

    #[error("max sum value must be >= 2, got {0}")]
    InvalidMaxSumValue(u32),
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Rules for one game: how large sums get, how long the round lasts and what
/// it takes to win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSettings {
    max_sum_value: u32,
    min_count_of_right_answers: u32,
    min_percent_of_right_answers: u32,
    game_time_secs: u32,
}

impl GameSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the game time is zero, the percent threshold
    /// exceeds 100 or the max sum cannot produce a question.
    pub fn new(
        max_sum_value: u32,
        min_count_of_right_answers: u32,
        min_percent_of_right_answers: u32,
        game_time_secs: u32,
    ) -> Result<Self, SettingsError> {
        if game_time_secs == 0 {
            return Err(SettingsError::InvalidGameTime);
        }
        if min_percent_of_right_answers > 100 {
            return Err(SettingsError::InvalidMinPercent(
                min_percent_of_right_answers,
            ));
        }
        if max_sum_value < MIN_SUM_VALUE {
            return Err(SettingsError::InvalidMaxSumValue(max_sum_value));
        }

        Ok(Self {
            max_sum_value,
            min_count_of_right_answers,
            min_percent_of_right_answers,
            game_time_secs,
        })
    }

    /// Built-in settings for a level.
    #[must_use]
    pub fn for_level(level: Level) -> Self {
        let (max_sum_value, min_count, min_percent, game_time_secs) = match level {
            Level::Test => (10, 3, 50, 8),
            Level::Easy => (10, 10, 70, 60),
            Level::Normal => (20, 20, 80, 40),
            Level::Hard => (30, 30, 90, 40),
        };
        Self {
            max_sum_value,
            min_count_of_right_answers: min_count,
            min_percent_of_right_answers: min_percent,
            game_time_secs,
        }
    }

    #[must_use]
    pub fn max_sum_value(&self) -> u32 {
        self.max_sum_value
    }

    #[must_use]
    pub fn min_count_of_right_answers(&self) -> u32 {
        self.min_count_of_right_answers
    }

    #[must_use]
    pub fn min_percent_of_right_answers(&self) -> u32 {
        self.min_percent_of_right_answers
    }

    #[must_use]
    pub fn game_time_secs(&self) -> u32 {
        self.game_time_secs
    }
}
