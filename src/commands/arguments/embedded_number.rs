use std::{fmt::Display, str::FromStr};

use crate::{commands::CommandError, utils::numbers::embedded_number};

/// A number typed with optional surrounding text, e.g. `Table 3` or just `3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmbeddedNumber(u32);

impl EmbeddedNumber {
    pub fn get(self) -> u32 {
        self.0
    }

    /// Whether `text` contains the same number, e.g. a sheet cell.
    pub fn matches(self, text: &str) -> bool {
        embedded_number(text) == Some(self.0)
    }
}

impl FromStr for EmbeddedNumber {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        embedded_number(s).map(EmbeddedNumber).ok_or_else(|| {
            super::invalid_argument(format!(
                "Expected a number, e.g. `3` or `Table 3`, got `{}`.",
                s.trim().escape_default()
            ))
        })
    }
}

impl Display for EmbeddedNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
