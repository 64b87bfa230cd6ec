//! Game state: the secret number and the remaining attempt budget.

use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use super::{configuration::Configuration, result::DrawResult};

/// Reason an attempt was refused without consuming the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// The guess lies outside the configured bounds.
    #[error("{guess} is outside [{min}, {max}]")]
    OutOfRange {
        /// Rejected guess.
        guess: i32,
        /// Configured lower bound.
        min: i32,
        /// Configured upper bound.
        max: i32,
    },
    /// The game already ended; it must be reset before guessing again.
    #[error("game already finished: {0}")]
    GameOver(DrawResult),
}

/// The configuration cannot produce a playable game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unplayable configuration: {0:?}")]
pub struct InconsistentConfiguration(pub Configuration);

/// Model contract consumed by the controller.
pub trait DrawNumber: Send {
    /// Classify a guess, spending one attempt when it is accepted.
    fn attempt(&mut self, n: i32) -> Result<DrawResult, AttemptError>;

    /// Restore the attempt budget and draw a new secret.
    fn reset(&mut self);

    /// Attempts left in the current game.
    fn remaining_attempts(&self) -> i32;

    /// Configuration the game was built from.
    fn configuration(&self) -> Configuration;
}

/// Default [`DrawNumber`] implementation.
///
/// Once a game ends with [`DrawResult::YouWon`] or [`DrawResult::YouLost`],
/// further attempts are refused with [`AttemptError::GameOver`] until
/// [`DrawNumber::reset`] is called.
#[derive(Debug)]
pub struct DrawNumberImpl<R = StdRng> {
    configuration: Configuration,
    remaining: i32,
    secret: i32,
    outcome: Option<DrawResult>,
    rng: R,
}

impl DrawNumberImpl<StdRng> {
    /// Create a model seeded from OS entropy.
    pub fn new(configuration: Configuration) -> Result<Self, InconsistentConfiguration> {
        Self::with_rng(configuration, StdRng::from_entropy())
    }
}

impl<R: Rng> DrawNumberImpl<R> {
    /// Create a model drawing secrets from `rng`.
    ///
    /// Fails unless [`Configuration::is_consistent`] holds.
    pub fn with_rng(
        configuration: Configuration,
        mut rng: R,
    ) -> Result<Self, InconsistentConfiguration> {
        if !configuration.is_consistent() {
            return Err(InconsistentConfiguration(configuration));
        }
        let secret = draw_secret(&configuration, &mut rng);
        Ok(Self {
            configuration,
            remaining: configuration.attempts(),
            secret,
            outcome: None,
            rng,
        })
    }

    #[cfg(test)]
    pub(crate) fn secret(&self) -> i32 {
        self.secret
    }
}

impl<R: Rng + Send> DrawNumber for DrawNumberImpl<R> {
    fn attempt(&mut self, n: i32) -> Result<DrawResult, AttemptError> {
        if let Some(outcome) = self.outcome {
            return Err(AttemptError::GameOver(outcome));
        }
        if !self.configuration.contains(n) {
            return Err(AttemptError::OutOfRange {
                guess: n,
                min: self.configuration.min(),
                max: self.configuration.max(),
            });
        }

        self.remaining -= 1;
        let result = if n == self.secret {
            DrawResult::YouWon
        } else if self.remaining <= 0 {
            DrawResult::YouLost
        } else if n < self.secret {
            DrawResult::TooLow
        } else {
            DrawResult::TooHigh
        };
        if result.is_terminal() {
            self.outcome = Some(result);
        }
        debug!(guess = n, remaining = self.remaining, ?result, "Attempt classified");
        Ok(result)
    }

    fn reset(&mut self) {
        self.remaining = self.configuration.attempts();
        self.secret = draw_secret(&self.configuration, &mut self.rng);
        self.outcome = None;
        debug!(remaining = self.remaining, "Game reset");
    }

    fn remaining_attempts(&self) -> i32 {
        self.remaining
    }

    fn configuration(&self) -> Configuration {
        self.configuration
    }
}

fn draw_secret<R: Rng>(configuration: &Configuration, rng: &mut R) -> i32 {
    rng.gen_range(configuration.min()..=configuration.max())
}
