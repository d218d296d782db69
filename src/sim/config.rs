use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::rules::{MAX_BOARD_SIZE, MAX_TURN_DELAY, MIN_BOARD_SIZE, MIN_FACTIONS, max_factions};

/// Setup parameters rejected before any simulation state is built.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("board size must be between {min} and {max}, got {got}")]
    BoardSize { got: usize, min: usize, max: usize },
    #[error("faction count must be between {min} and {max} for this board, got {got}")]
    FactionCount { got: usize, min: usize, max: usize },
    #[error("turn delay must be between 0 and {max} seconds, got {got}")]
    TurnDelay { got: f64, max: f64 },
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Side length of the square board.
    pub board_size: usize,
    pub faction_count: usize,
    /// Pause between ticks, in seconds. Pacing only.
    pub turn_delay: f64,
    /// RNG seed. Drawn at random (and logged) when absent.
    pub seed: Option<u64>,
    /// Stop after this many turns even if several factions survive.
    pub max_turns: Option<u32>,
    /// Directory to write `turns.jsonl` and `battles.jsonl` into once the run ends.
    pub output_dir: Option<PathBuf>,
}

impl SimConfig {
    pub fn new(board_size: usize, faction_count: usize) -> Self {
        Self {
            board_size,
            faction_count,
            turn_delay: 0.0,
            seed: None,
            max_turns: None,
            output_dir: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_turn_delay(mut self, seconds: f64) -> Self {
        self.turn_delay = seconds;
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Check every parameter against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize {
                got: self.board_size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }

        let max = max_factions(self.board_size);
        if !(MIN_FACTIONS..=max).contains(&self.faction_count) {
            return Err(ConfigError::FactionCount {
                got: self.faction_count,
                min: MIN_FACTIONS,
                max,
            });
        }

        // NaN fails the range check too
        if !(0.0..=MAX_TURN_DELAY).contains(&self.turn_delay) {
            return Err(ConfigError::TurnDelay {
                got: self.turn_delay,
                max: MAX_TURN_DELAY,
            });
        }
        Ok(())
    }

    pub fn turn_delay_duration(&self) -> Duration {
        Duration::from_secs_f64(self.turn_delay.clamp(0.0, MAX_TURN_DELAY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimConfig::new(10, 2).validate(), Ok(()));
        assert_eq!(SimConfig::new(100, 1000).validate(), Ok(()));
    }

    #[test]
    fn board_size_bounds() {
        assert_eq!(
            SimConfig::new(9, 2).validate(),
            Err(ConfigError::BoardSize {
                got: 9,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE
            })
        );
        assert!(SimConfig::new(101, 2).validate().is_err());
    }

    #[test]
    fn faction_count_bounds() {
        assert_eq!(
            SimConfig::new(10, 11).validate(),
            Err(ConfigError::FactionCount {
                got: 11,
                min: 2,
                max: 10
            })
        );
        assert!(SimConfig::new(10, 1).validate().is_err());
    }

    #[test]
    fn turn_delay_bounds() {
        assert!(SimConfig::new(10, 2).with_turn_delay(60.0).validate().is_ok());
        assert!(SimConfig::new(10, 2).with_turn_delay(-0.1).validate().is_err());
        assert!(SimConfig::new(10, 2).with_turn_delay(60.5).validate().is_err());
        assert!(SimConfig::new(10, 2).with_turn_delay(f64::NAN).validate().is_err());
    }

    #[test]
    fn error_messages_name_the_range() {
        let err = SimConfig::new(5, 2).validate().unwrap_err();
        assert_eq!(err.to_string(), "board size must be between 10 and 100, got 5");
    }

    #[test]
    fn delay_converts_to_duration() {
        let config = SimConfig::new(10, 2).with_turn_delay(0.25);
        assert_eq!(config.turn_delay_duration(), Duration::from_millis(250));
    }
}
