use serde::Serialize;

use crate::model::score::percent_of;
use crate::model::{GameSettings, Score};

/// Outcome of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: bool,
    pub count_of_right_answers: u32,
    pub count_of_questions: u32,
    pub game_settings: GameSettings,
}

impl GameResult {
    /// Build the final result from the tally at the moment time ran out.
    #[must_use]
    pub fn from_score(score: &Score, game_settings: GameSettings) -> Self {
        let winner = score.evaluate(&game_settings).is_winning();
        Self {
            winner,
            count_of_right_answers: score.right_answers(),
            count_of_questions: score.total_questions(),
            game_settings,
        }
    }

    /// Share of right answers, rounded down like live progress.
    #[must_use]
    pub fn percent(&self) -> u32 {
        percent_of(self.count_of_right_answers, self.count_of_questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_game_is_lost() {
        let settings = GameSettings::new(10, 3, 60, 5).unwrap();
        let result = GameResult::from_score(&Score::new(), settings);
        assert!(!result.winner);
        assert_eq!(result.count_of_right_answers, 0);
        assert_eq!(result.count_of_questions, 0);
        assert_eq!(result.percent(), 0);
    }

    #[test]
    fn three_of_four_wins() {
        let settings = GameSettings::new(10, 3, 60, 5).unwrap();
        let mut score = Score::new();
        for correct in [true, true, false, true] {
            score.record(correct);
        }
        let result = GameResult::from_score(&score, settings.clone());
        assert!(result.winner);
        assert_eq!(result.count_of_right_answers, 3);
        assert_eq!(result.count_of_questions, 4);
        assert_eq!(result.percent(), 75);
        assert_eq!(result.game_settings, settings);
    }

    #[test]
    fn percent_is_truncated() {
        let settings = GameSettings::new(10, 1, 50, 5).unwrap();
        let mut score = Score::new();
        for correct in [true, true, false] {
            score.record(correct);
        }
        assert_eq!(GameResult::from_score(&score, settings).percent(), 66);
    }

    #[test]
    fn serializes_with_settings() {
        let settings = GameSettings::new(10, 3, 60, 5).unwrap();
        let result = GameResult::from_score(&Score::new(), settings);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["winner"], false);
        assert_eq!(json["game_settings"]["game_time_secs"], 5);
    }
}
