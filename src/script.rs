//! Intent scripts - headless input for a session
//!
//! One step per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! moveLeft x3
//! rotate
//! tick 16 x60
//! at 2500
//! hardDrop
//! ```
//!
//! Intent names are the [`GameAction`] names (case-insensitive). `tick <ms>`
//! advances time by a relative amount, `at <ms>` feeds an absolute frame
//! timestamp. A trailing `x<count>` repeats the step.

use anyhow::{anyhow, bail, Context, Result};

use crate::core::GameSession;
use crate::types::GameAction;

/// Upper bound on `x<count>` to keep typos from running forever
pub const MAX_REPEAT: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Action(GameAction),
    /// Relative time step
    Tick(u32),
    /// Absolute frame timestamp
    At(u64),
}

impl ScriptStep {
    /// Apply to a session; returns whether state changed
    pub fn apply(&self, session: &mut GameSession) -> bool {
        match *self {
            ScriptStep::Action(action) => session.apply_action(action),
            ScriptStep::Tick(ms) => session.tick(ms),
            ScriptStep::At(ts) => session.tick_at(ts),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based source line
    pub line: usize,
    pub step: ScriptStep,
    pub repeat: u32,
}

/// Parse a whole script
pub fn parse_script(src: &str) -> Result<Vec<ScriptLine>> {
    let mut out = Vec::new();
    for (i, raw) in src.lines().enumerate() {
        let line = i + 1;
        if let Some((step, repeat)) =
            parse_line(raw).with_context(|| format!("script line {}: {:?}", line, raw.trim()))?
        {
            out.push(ScriptLine { line, step, repeat });
        }
    }
    Ok(out)
}

/// Parse one line; `None` for blanks and comments
pub fn parse_line(raw: &str) -> Result<Option<(ScriptStep, u32)>> {
    let text = raw.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let mut words: Vec<&str> = text.split_whitespace().collect();

    let mut repeat = 1;
    if let Some(last) = words.last() {
        if words.len() > 1 {
            if let Some(count) = last.strip_prefix('x') {
                repeat = parse_repeat(count)?;
                words.pop();
            }
        }
    }

    let step = match words.as_slice() {
        ["tick", ms] => ScriptStep::Tick(
            ms.parse()
                .map_err(|_| anyhow!("tick expects milliseconds, got {:?}", ms))?,
        ),
        ["at", ts] => ScriptStep::At(
            ts.parse()
                .map_err(|_| anyhow!("at expects a timestamp, got {:?}", ts))?,
        ),
        ["tick"] | ["at"] => bail!("missing time value"),
        [name] => ScriptStep::Action(
            GameAction::from_str(name).ok_or_else(|| anyhow!("unknown intent {:?}", name))?,
        ),
        _ => bail!("expected one intent or `tick <ms>`"),
    };

    Ok(Some((step, repeat)))
}

fn parse_repeat(count: &str) -> Result<u32> {
    let n: u32 = count
        .parse()
        .map_err(|_| anyhow!("bad repeat count {:?}", count))?;
    if n == 0 || n > MAX_REPEAT {
        bail!("repeat count must be in 1..={}", MAX_REPEAT);
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_intents_ticks_and_repeats() {
        let src = "# warmup\n\nmoveLeft x3\nROTATECCW\ntick 16 x10\nat 1200\nhardDrop\n";
        let steps = parse_script(src).unwrap();

        assert_eq!(
            steps,
            vec![
                ScriptLine {
                    line: 3,
                    step: ScriptStep::Action(GameAction::MoveLeft),
                    repeat: 3
                },
                ScriptLine {
                    line: 4,
                    step: ScriptStep::Action(GameAction::RotateCcw),
                    repeat: 1
                },
                ScriptLine {
                    line: 5,
                    step: ScriptStep::Tick(16),
                    repeat: 10
                },
                ScriptLine {
                    line: 6,
                    step: ScriptStep::At(1200),
                    repeat: 1
                },
                ScriptLine {
                    line: 7,
                    step: ScriptStep::Action(GameAction::HardDrop),
                    repeat: 1
                },
            ]
        );
    }

    #[test]
    fn errors_name_the_line() {
        let err = parse_script("hold\nteleport\n").unwrap_err();
        assert!(format!("{:#}", err).contains("script line 2"));

        assert!(parse_line("tick").is_err());
        assert!(parse_line("tick fast").is_err());
        assert!(parse_line("hold x0").is_err());
        assert!(parse_line("hold twice").is_err());
    }
}
