//! Outcome of a single attempt.

use std::fmt;

/// Outcome of a single accepted attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawResult {
    /// The guess is below the secret number.
    TooLow,
    /// The guess is above the secret number.
    TooHigh,
    /// The guess matched the secret number.
    YouWon,
    /// The last attempt was spent without a match.
    YouLost,
}

impl DrawResult {
    /// User-facing description of the outcome.
    pub fn description(&self) -> &'static str {
        match self {
            DrawResult::TooLow => "Your number is too small",
            DrawResult::TooHigh => "Your number is too big",
            DrawResult::YouWon => "You won!",
            DrawResult::YouLost => "You lost!",
        }
    }

    /// `true` for outcomes that end the current game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DrawResult::YouWon | DrawResult::YouLost)
    }
}

impl fmt::Display for DrawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
