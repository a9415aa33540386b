use std::{
    error::Error,
    fmt::{Display, Formatter},
};

use crate::{stage::InvalidStageError, Bell, Stage};

/// All the possible ways that a [`Row`](super::Row) could be invalid.
///
/// Note that by the Pigeon Hole Principle, we do not need a variant for a missing [`Bell`],
/// because that would cause either a duplicate [`Bell`] or a [`Bell`] out of the stage.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum InvalidRowError {
    /// The [`Row`](super::Row) would contain no [`Bell`]s
    NoBells,
    /// The [`Row`](super::Row) would contain more [`Bell`]s than there are bell names
    TooManyBells(usize),
    /// A [`Bell`] would appear twice in the new [`Row`](super::Row) (for example in `113456` or
    /// `4152357`)
    DuplicateBell(Bell),
    /// A [`Bell`] is not within the range of the [`Stage`] of the new [`Row`](super::Row) (for
    /// example `7` in `12745` or `5` in `5432`).
    BellOutOfStage(Bell, Stage),
}

impl From<InvalidStageError> for InvalidRowError {
    fn from(InvalidStageError(num_bells): InvalidStageError) -> Self {
        match num_bells {
            0 => InvalidRowError::NoBells,
            n => InvalidRowError::TooManyBells(n as usize),
        }
    }
}

impl Display for InvalidRowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidRowError::DuplicateBell(bell) => {
                write!(f, "Bell '{}' appears twice.", bell)
            }
            InvalidRowError::BellOutOfStage(bell, stage) => {
                write!(f, "Bell '{}' is not within stage {}", bell, stage)
            }
            InvalidRowError::NoBells => write!(f, "Row would have no bells"),
            InvalidRowError::TooManyBells(n) => write!(
                f,
                "Row would have {} bells, but at most {} can be named",
                n,
                Stage::MAX.num_bells()
            ),
        }
    }
}

impl Error for InvalidRowError {}
