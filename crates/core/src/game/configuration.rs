//! Bounds and attempt budget for a single game.

/// Lower bound used when none is configured.
pub const DEFAULT_MIN: i32 = 0;
/// Upper bound used when none is configured.
pub const DEFAULT_MAX: i32 = 100;
/// Attempt budget used when none is configured.
pub const DEFAULT_ATTEMPTS: i32 = 10;

/// Immutable `(min, max, attempts)` triple governing one game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    min: i32,
    max: i32,
    attempts: i32,
}

impl Configuration {
    /// Smallest number a guess may take.
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Largest number a guess may take.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Number of guesses allowed per game.
    pub fn attempts(&self) -> i32 {
        self.attempts
    }

    /// Returns `true` when the bounds form a non-empty range and at least one attempt is allowed.
    pub fn is_consistent(&self) -> bool {
        self.min < self.max && self.attempts > 0
    }

    /// Whether `n` lies within the inclusive `[min, max]` range.
    pub fn contains(&self, n: i32) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        ConfigurationBuilder::default().build()
    }
}

/// Collects configuration values without validating them.
///
/// Validation is left to the caller through [`Configuration::is_consistent`].
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    min: i32,
    max: i32,
    attempts: i32,
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl ConfigurationBuilder {
    /// Set the lower bound.
    pub fn set_min(&mut self, min: i32) -> &mut Self {
        self.min = min;
        self
    }

    /// Set the upper bound.
    pub fn set_max(&mut self, max: i32) -> &mut Self {
        self.max = max;
        self
    }

    /// Set the attempt budget.
    pub fn set_attempts(&mut self, attempts: i32) -> &mut Self {
        self.attempts = attempts;
        self
    }

    /// Snapshot the current values.
    pub fn build(&self) -> Configuration {
        Configuration {
            min: self.min,
            max: self.max,
            attempts: self.attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min: i32, max: i32, attempts: i32) -> Configuration {
        ConfigurationBuilder::default()
            .set_min(min)
            .set_max(max)
            .set_attempts(attempts)
            .build()
    }

    #[test]
    fn unset_fields_fall_back_to_defaults() {
        let built = ConfigurationBuilder::default().set_max(50).build();
        assert_eq!(built.min(), DEFAULT_MIN);
        assert_eq!(built.max(), 50);
        assert_eq!(built.attempts(), DEFAULT_ATTEMPTS);
        assert_eq!(Configuration::default(), ConfigurationBuilder::default().build());
        assert!(Configuration::default().is_consistent());
    }

    #[test]
    fn consistency_requires_ordered_bounds_and_attempts() {
        for (min, max, attempts, expected) in [
            (1, 100, 3, true),
            (-5, -4, 1, true),
            (10, 5, 3, false),
            (7, 7, 3, false),
            (1, 100, 0, false),
            (1, 100, -2, false),
        ] {
            assert_eq!(
                config(min, max, attempts).is_consistent(),
                expected,
                "min={min} max={max} attempts={attempts}"
            );
        }
    }

    #[test]
    fn builder_does_not_validate() {
        let built = config(10, 5, -1);
        assert_eq!((built.min(), built.max(), built.attempts()), (10, 5, -1));
    }

    #[test]
    fn contains_is_inclusive() {
        let built = config(1, 10, 3);
        assert!(built.contains(1));
        assert!(built.contains(10));
        assert!(!built.contains(0));
        assert!(!built.contains(11));
    }
}
