use crate::model::GameSettings;

/// Running tally of a session.
///
/// `right_answers` never exceeds `total_questions`: the only mutation is
/// `record`, which bumps both counters together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    right_answers: u32,
    total_questions: u32,
}

impl Score {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one answered question.
    pub fn record(&mut self, correct: bool) {
        self.total_questions = self.total_questions.saturating_add(1);
        if correct {
            self.right_answers = self.right_answers.saturating_add(1);
        }
    }

    #[must_use]
    pub fn right_answers(&self) -> u32 {
        self.right_answers
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Share of right answers in whole percent, rounded down.
    ///
    /// Returns 0 before anything was answered.
    #[must_use]
    pub fn percent(&self) -> u32 {
        percent_of(self.right_answers, self.total_questions)
    }

    /// Compare the tally against the thresholds in `settings`.
    #[must_use]
    pub fn evaluate(&self, settings: &GameSettings) -> ProgressSnapshot {
        let percent = self.percent();
        ProgressSnapshot {
            right_answers: self.right_answers,
            total_questions: self.total_questions,
            percent,
            enough_count: self.right_answers >= settings.min_count_of_right_answers(),
            enough_percent: percent >= settings.min_percent_of_right_answers(),
        }
    }
}

pub(crate) fn percent_of(right: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let right = u64::from(right.min(total));
    let whole = right * 100 / u64::from(total);
    u32::try_from(whole).unwrap_or(100)
}

/// Progress as shown to the player after every answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub right_answers: u32,
    pub total_questions: u32,
    pub percent: u32,
    pub enough_count: bool,
    pub enough_percent: bool,
}

impl ProgressSnapshot {
    /// Both thresholds are met.
    #[must_use]
    pub fn is_winning(&self) -> bool {
        self.enough_count && self.enough_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Level;

    fn score(right: u32, wrong: u32) -> Score {
        let mut score = Score::new();
        for _ in 0..right {
            score.record(true);
        }
        for _ in 0..wrong {
            score.record(false);
        }
        score
    }

    #[test]
    fn percent_is_zero_without_answers() {
        assert_eq!(Score::new().percent(), 0);
    }

    #[test]
    fn percent_rounds_down() {
        assert_eq!(score(2, 1).percent(), 66);
        assert_eq!(score(1, 2).percent(), 33);
        assert_eq!(score(1, 7).percent(), 12);
        assert_eq!(score(3, 1).percent(), 75);
        assert_eq!(score(4, 0).percent(), 100);
        assert_eq!(score(0, 5).percent(), 0);
    }

    #[test]
    fn record_keeps_right_within_total() {
        let mut tally = Score::new();
        for correct in [true, false, true, true, false] {
            tally.record(correct);
            assert!(tally.right_answers() <= tally.total_questions());
        }
        assert_eq!(tally.right_answers(), 3);
        assert_eq!(tally.total_questions(), 5);
    }

    #[test]
    fn evaluate_checks_both_thresholds() {
        let settings = GameSettings::new(10, 3, 60, 5).unwrap();

        let snapshot = score(3, 1).evaluate(&settings);
        assert!(snapshot.enough_count);
        assert!(snapshot.enough_percent);
        assert!(snapshot.is_winning());

        let snapshot = score(1, 3).evaluate(&settings);
        assert!(!snapshot.enough_count);
        assert!(!snapshot.enough_percent);
        assert!(!snapshot.is_winning());

        let snapshot = score(3, 3).evaluate(&settings);
        assert!(snapshot.enough_count);
        assert!(!snapshot.enough_percent);
        assert!(!snapshot.is_winning());
    }

    #[test]
    fn just_below_threshold_does_not_round_up_to_a_win() {
        // 179 of 200 is 89.5 %, short of the hard level's 90 %.
        let settings = GameSettings::for_level(Level::Hard);
        let snapshot = score(179, 21).evaluate(&settings);
        assert_eq!(snapshot.percent, 89);
        assert!(snapshot.enough_count);
        assert!(!snapshot.enough_percent);
        assert!(!snapshot.is_winning());
    }

    #[test]
    fn zero_thresholds_pass_on_empty_score() {
        let settings = GameSettings::new(10, 0, 0, 5).unwrap();
        assert!(Score::new().evaluate(&settings).is_winning());
    }
}
