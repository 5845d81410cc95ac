use rand::rngs::StdRng;
use rand::seq::{SliceRandom, index};
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::model::{MIN_SUM_VALUE, Question};

/// Number of answer options shown for every question.
pub const OPTION_COUNT: usize = 6;

/// Smallest value a visible number or an answer can take.
const MIN_ANSWER_VALUE: u32 = 1;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("option count must be > 0")]
    NoOptions,

    #[error("max sum value must be >= 2, got {max_sum}")]
    MaxSumTooSmall { max_sum: u32 },

    #[error("max sum {max_sum} allows only {available} distinct answers, {option_count} options requested")]
    NotEnoughAnswers {
        max_sum: u32,
        option_count: usize,
        available: u32,
    },
}

/// Check that `generate(max_sum, option_count)` can succeed.
///
/// Every answer lies in `1..max_sum`, so there must be at least
/// `option_count` values in that range.
///
/// # Errors
///
/// Returns `QuestionError` describing the first violated precondition.
pub fn validate_params(max_sum: u32, option_count: usize) -> Result<(), QuestionError> {
    if option_count == 0 {
        return Err(QuestionError::NoOptions);
    }
    if max_sum < MIN_SUM_VALUE {
        return Err(QuestionError::MaxSumTooSmall { max_sum });
    }
    let available = max_sum - MIN_ANSWER_VALUE;
    let enough = u32::try_from(option_count).is_ok_and(|count| count <= available);
    if !enough {
        return Err(QuestionError::NotEnoughAnswers {
            max_sum,
            option_count,
            available,
        });
    }
    Ok(())
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Produces random "complete the sum" questions.
///
/// Each call is independent; nothing prevents the same question from coming
/// up twice in a row.
#[derive(Debug, Clone)]
pub struct QuestionGenerator<R = StdRng> {
    rng: R,
}

impl QuestionGenerator<StdRng> {
    /// Generator seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic generator for tests and replays.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuestionGenerator<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a question with a sum in `2..=max_sum` and `option_count` options.
    ///
    /// - `visible_number` is drawn from `1..sum`, the right answer is the rest.
    /// - Decoys come from a window of `2 * option_count + 1` values around the
    ///   right answer, clamped to `1..max_sum`, so they look plausible.
    /// - Options are distinct and shuffled; exactly one is the right answer.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the parameters cannot yield enough
    /// distinct options (see [`validate_params`]).
    pub fn generate(&mut self, max_sum: u32, option_count: usize) -> Result<Question, QuestionError> {
        validate_params(max_sum, option_count)?;

        let sum = self.rng.random_range(MIN_SUM_VALUE..=max_sum);
        let visible_number = self.rng.random_range(MIN_ANSWER_VALUE..sum);
        let right_answer = sum - visible_number;

        let decoys = self.decoys(right_answer, max_sum - MIN_ANSWER_VALUE, option_count);
        let mut options = Vec::with_capacity(option_count);
        options.push(right_answer);
        options.extend(decoys);
        options.shuffle(&mut self.rng);

        Ok(Question::new(sum, visible_number, options))
    }

    fn decoys(&mut self, right_answer: u32, highest: u32, option_count: usize) -> Vec<u32> {
        // validate_params guarantees option_count <= highest, so this fits.
        let count = u32::try_from(option_count).unwrap_or(highest);
        let width = count.saturating_mul(2).saturating_add(1).min(highest);

        let mut low = right_answer.saturating_sub(count).max(MIN_ANSWER_VALUE);
        if low + width - 1 > highest {
            low = highest - width + 1;
        }

        let candidates: Vec<u32> = (low..low + width)
            .filter(|value| *value != right_answer)
            .collect();

        index::sample(&mut self.rng, candidates.len(), option_count - 1)
            .into_iter()
            .map(|i| candidates[i])
            .collect()
    }
}
