//! Parameters which change how the engine runs, rather than what it rings.

use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde_crate::Deserialize;

/// General configuration parameters for ringing [`Method`](crate::Method)s.  Neither field changes
/// the rows produced by a valid method; they only decide when the engine gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize),
    serde(crate = "serde_crate", default, deny_unknown_fields)
)]
pub struct Config {
    /// The most rows that a plain course (or [`Block::repeat`](crate::Block::repeat)) is allowed
    /// to ring before it's declared to never come round.
    pub max_rows: usize,
    /// If `true`, touch strings may only contain `P`, `B`, `S` and whitespace.  Otherwise, any
    /// other [`char`]s are skipped.
    pub strict_calls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_rows: 1_000_000,
            strict_calls: true,
        }
    }
}

/// The error created when some ringing fails to come round within [`Config::max_rows`] rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonTerminatingMethodError {
    pub max_rows: usize,
}

impl Display for NonTerminatingMethodError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ringing didn't come round within {} rows", self.max_rows)
    }
}

impl std::error::Error for NonTerminatingMethodError {}
