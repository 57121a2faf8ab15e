//! `GROUP=OPTION` command-line picks.

use std::str::FromStr;

use aof_core::selection::Selection;
use thiserror::Error;

/// Error parsing a pick argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickParseError {
    /// The argument has no `=` separator.
    #[error("expected GROUP=OPTION, got '{0}'")]
    MissingSeparator(String),

    /// The group or option part is empty.
    #[error("group and option must not be empty in '{0}'")]
    EmptyPart(String),
}

/// One upgrade pick given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    /// Group label.
    pub group: String,
    /// Option name.
    pub option: String,
}

impl FromStr for Pick {
    type Err = PickParseError;

    /// Split on the first `=`; option names may themselves contain `=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (group, option) = s
            .split_once('=')
            .ok_or_else(|| PickParseError::MissingSeparator(s.to_string()))?;
        let (group, option) = (group.trim(), option.trim());
        if group.is_empty() || option.is_empty() {
            return Err(PickParseError::EmptyPart(s.to_string()));
        }
        Ok(Self {
            group: group.to_string(),
            option: option.to_string(),
        })
    }
}

/// Build a selection from picks, keeping duplicates.
#[must_use]
pub fn selection_from_picks(picks: &[Pick]) -> Selection {
    picks
        .iter()
        .map(|p| (p.group.as_str(), p.option.as_str()))
        .collect()
}
