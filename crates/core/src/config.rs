//! Session configuration.

use crate::error::ConfigError;
use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, LINES_PER_LEVEL, LOCK_DELAY_MS, LOCK_RESET_LIMIT,
};

/// Smallest and largest accepted board sizes
pub const MIN_ROWS: usize = 4;
pub const MAX_ROWS: usize = 64;
pub const MIN_COLS: usize = 4;
pub const MAX_COLS: usize = 32;

/// How the lookahead piece is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Randomizer {
    /// Independent uniform draw over the seven kinds
    #[default]
    Uniform,
    /// Shuffled bag containing each kind once
    SevenBag,
}

impl Randomizer {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Some(Randomizer::Uniform),
            "bag" | "7bag" | "sevenbag" => Some(Randomizer::SevenBag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Randomizer::Uniform => "uniform",
            Randomizer::SevenBag => "bag",
        }
    }
}

/// Tunables for a [`GameSession`](crate::GameSession)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    pub lock_delay_ms: u32,
    pub lock_reset_limit: u8,
    pub lines_per_level: u32,
    pub randomizer: Randomizer,
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_HEIGHT as usize,
            cols: BOARD_WIDTH as usize,
            lock_delay_ms: LOCK_DELAY_MS,
            lock_reset_limit: LOCK_RESET_LIMIT,
            lines_per_level: LINES_PER_LEVEL,
            randomizer: Randomizer::Uniform,
            seed: 1,
        }
    }
}

impl SessionConfig {
    /// Default configuration with the given RNG seed
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.rows, self.cols)?;
        if self.lock_delay_ms == 0 {
            return Err(ConfigError::InvalidTiming("lock delay must be positive"));
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::InvalidTiming("lines per level must be positive"));
        }
        Ok(())
    }
}

pub(crate) fn validate_dimensions(rows: usize, cols: usize) -> Result<(), ConfigError> {
    if !(MIN_ROWS..=MAX_ROWS).contains(&rows) || !(MIN_COLS..=MAX_COLS).contains(&cols) {
        return Err(ConfigError::InvalidDimensions { rows, cols });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_canonical() {
        let config = SessionConfig::default();
        assert_eq!((config.rows, config.cols), (20, 10));
        assert_eq!(config.lock_delay_ms, 500);
        assert_eq!(config.lock_reset_limit, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_dimensions() {
        for (rows, cols) in [(0, 10), (3, 10), (20, 3), (65, 10), (20, 33)] {
            let config = SessionConfig {
                rows,
                cols,
                ..SessionConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidDimensions { rows, cols })
            );
        }
    }

    #[test]
    fn rejects_zero_timing() {
        let config = SessionConfig {
            lock_delay_ms: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTiming(_))));

        let config = SessionConfig {
            lines_per_level: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTiming(_))));
    }

    #[test]
    fn randomizer_names() {
        assert_eq!(Randomizer::from_str("Bag"), Some(Randomizer::SevenBag));
        assert_eq!(Randomizer::from_str(" uniform "), Some(Randomizer::Uniform));
        assert_eq!(Randomizer::from_str("weighted"), None);
    }
}
