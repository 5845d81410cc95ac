use compositions_core::{GameResult, ProgressSnapshot, Question};

use crate::observable::Observable;

/// Everything a presentation layer can watch during a game.
///
/// Each field holds its latest value; `game_result` is set exactly once, when
/// time runs out.
#[derive(Debug, Default)]
pub struct GameSignals {
    pub question: Observable<Question>,
    pub formatted_time: Observable<String>,
    pub percent_of_right_answers: Observable<u32>,
    pub min_percent: Observable<u32>,
    pub enough_count_of_right_answers: Observable<bool>,
    pub enough_percent_of_right_answers: Observable<bool>,
    /// Right answers against the required count, e.g. `"4 of 10"`.
    pub progress_answers: Observable<String>,
    pub progress: Observable<ProgressSnapshot>,
    pub game_result: Observable<GameResult>,
}

impl GameSignals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Progress text shown next to the progress bar.
#[must_use]
pub fn format_progress(right_answers: u32, min_count_of_right_answers: u32) -> String {
    format!("{right_answers} of {min_count_of_right_answers}")
}
