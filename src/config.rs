//! Table parameters, fixed at game creation.

use std::time::Duration;

/// Smallest and largest permitted starting stack.
pub const STACK_MIN: u64 = 1;
pub const STACK_MAX: u64 = 400;

/// A rejected table configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("starting stack must be between 1 and 400, got {0}")]
    StartingStackOutOfRange(u64),
    #[error("small blind must be at least 1")]
    SmallBlindZero,
}

/// Everything a table is created with. Immutable once the table exists;
/// the big blind is always twice the small blind, with no independent
/// knob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Chips every player sits down with.
    pub starting_stack: u64,
    /// Forced bet for the small-blind seat; the big blind doubles it.
    pub small_blind: u64,
    /// Chips taken from every dealt-in stack once per hand, before the
    /// blinds. Zero disables the rake.
    pub rake_per_player: u64,
    /// How long a player may sit on their turn before being auto-folded.
    pub turn_timeout: Duration,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stack: 50,
            small_blind: 1,
            rake_per_player: 0,
            turn_timeout: Duration::from_secs(90),
        }
    }
}

impl TableConfig {
    pub fn big_blind(&self) -> u64 {
        self.small_blind * 2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(STACK_MIN..=STACK_MAX).contains(&self.starting_stack) {
            return Err(ConfigError::StartingStackOutOfRange(self.starting_stack));
        }
        if self.small_blind == 0 {
            return Err(ConfigError::SmallBlindZero);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TableConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.starting_stack, 50);
        assert_eq!(config.big_blind(), 2);
    }

    #[test]
    fn stack_bounds_enforced() {
        let mut config = TableConfig { starting_stack: 0, ..TableConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::StartingStackOutOfRange(0)));

        config.starting_stack = 401;
        assert_eq!(config.validate(), Err(ConfigError::StartingStackOutOfRange(401)));

        config.starting_stack = 400;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_small_blind_rejected() {
        let config = TableConfig { small_blind: 0, ..TableConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::SmallBlindZero));
    }
}
