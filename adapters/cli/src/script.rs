//! Scripted steering input for unattended games.

use std::str::FromStr;

use danger_noodle_core::Direction;
use thiserror::Error;

/// Raised when a steering script contains an unsupported letter.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// The letter does not map to a heading or a pause.
    #[error("unknown script letter `{letter}` at position {position}; expected u, d, l, r or .")]
    UnknownLetter {
        /// Offending character.
        letter: char,
        /// Zero-based character index in the script.
        position: usize,
    },
}

/// Sequence of per-tick steering requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Script {
    steps: Vec<Option<Direction>>,
    cursor: usize,
}

impl Script {
    /// Returns the request for the upcoming tick. An exhausted script steers nowhere.
    pub(crate) fn next_step(&mut self) -> Option<Direction> {
        let step = self.steps.get(self.cursor).copied().flatten();
        self.cursor = self.cursor.saturating_add(1);
        step
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let steps = value
            .chars()
            .enumerate()
            .filter(|(_, letter)| !letter.is_whitespace())
            .map(|(position, letter)| match letter.to_ascii_lowercase() {
                'u' => Ok(Some(Direction::Up)),
                'd' => Ok(Some(Direction::Down)),
                'l' => Ok(Some(Direction::Left)),
                'r' => Ok(Some(Direction::Right)),
                '.' => Ok(None),
                _ => Err(ScriptError::UnknownLetter { letter, position }),
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { steps, cursor: 0 })
    }
}
