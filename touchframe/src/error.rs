//! The crate-wide error type, covering every way that parsing or ringing can fail.

use std::fmt::{Display, Formatter};

use crate::{
    call::TouchError, config::NonTerminatingMethodError, place_not::NotationError,
    InvalidRowError, SizeMismatchError,
};

/// Alias for `Result<T, touchframe::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// The different ways that touchframe can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Some place notation (or call change) couldn't be parsed
    Notation(NotationError),
    /// Some string couldn't be parsed as a [`Row`](crate::Row)
    InvalidRow(InvalidRowError),
    /// Two things with incompatible [`Stage`](crate::Stage)s were combined
    SizeMismatch(SizeMismatchError),
    /// A touch or a method's calls were invalid
    Touch(TouchError),
    /// Some ringing never came round
    NonTerminating(NonTerminatingMethodError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Notation(e) => write!(f, "Invalid place notation: {}", e),
            Error::InvalidRow(e) => write!(f, "Invalid row: {}", e),
            Error::SizeMismatch(e) => write!(f, "{}", e),
            Error::Touch(e) => write!(f, "Invalid touch: {}", e),
            Error::NonTerminating(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(match self {
            Error::Notation(e) => e,
            Error::InvalidRow(e) => e,
            Error::SizeMismatch(e) => e,
            Error::Touch(e) => e,
            Error::NonTerminating(e) => e,
        })
    }
}

impl From<NotationError> for Error {
    fn from(e: NotationError) -> Self {
        Error::Notation(e)
    }
}

impl From<InvalidRowError> for Error {
    fn from(e: InvalidRowError) -> Self {
        Error::InvalidRow(e)
    }
}

impl From<SizeMismatchError> for Error {
    fn from(e: SizeMismatchError) -> Self {
        Error::SizeMismatch(e)
    }
}

impl From<TouchError> for Error {
    fn from(e: TouchError) -> Self {
        Error::Touch(e)
    }
}

impl From<NonTerminatingMethodError> for Error {
    fn from(e: NonTerminatingMethodError) -> Self {
        Error::NonTerminating(e)
    }
}
