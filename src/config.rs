//! Runner configuration from the environment.

use crate::core::{Randomizer, SessionConfig};

/// When the runner prints observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// After every step that changed state
    #[default]
    Changes,
    /// Once, after the script finishes
    Final,
}

impl EmitMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "changes" | "all" => Some(EmitMode::Changes),
            "final" | "last" => Some(EmitMode::Final),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub session: SessionConfig,
    pub log_path: Option<String>,
    pub emit: EmitMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            log_path: None,
            emit: EmitMode::Changes,
        }
    }
}

impl RunConfig {
    /// Read `BLOCKFALL_*` variables; malformed values fall back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RunConfig::from_env`] with an injectable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SessionConfig::default();

        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);
        let rows = lookup("BLOCKFALL_ROWS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.rows);
        let cols = lookup("BLOCKFALL_COLS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.cols);
        let randomizer = lookup("BLOCKFALL_RANDOMIZER")
            .and_then(|s| Randomizer::from_str(&s))
            .unwrap_or(defaults.randomizer);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let emit = lookup("BLOCKFALL_EMIT")
            .and_then(|s| EmitMode::from_str(&s))
            .unwrap_or_default();

        Self {
            session: SessionConfig {
                rows,
                cols,
                randomizer,
                seed,
                ..defaults
            },
            log_path,
            emit,
        }
    }
}
