/// One round of the game.
///
/// The player sees `sum` and `visible_number` and has to pick the option that
/// completes the sum, so `visible_number + right_answer == sum` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    sum: u32,
    visible_number: u32,
    options: Vec<u32>,
    right_answer: u32,
}

impl Question {
    pub(crate) fn new(sum: u32, visible_number: u32, options: Vec<u32>) -> Self {
        debug_assert!(visible_number < sum);
        let right_answer = sum - visible_number;
        debug_assert!(options.contains(&right_answer));
        Self {
            sum,
            visible_number,
            options,
            right_answer,
        }
    }

    #[must_use]
    pub fn sum(&self) -> u32 {
        self.sum
    }

    #[must_use]
    pub fn visible_number(&self) -> u32 {
        self.visible_number
    }

    /// Candidate answers in display order.
    #[must_use]
    pub fn options(&self) -> &[u32] {
        &self.options
    }

    #[must_use]
    pub fn right_answer(&self) -> u32 {
        self.right_answer
    }

    #[must_use]
    pub fn is_right(&self, answer: u32) -> bool {
        answer == self.right_answer
    }
}
