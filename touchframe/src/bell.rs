//! A type-safe representation of a bell.

use std::fmt::{Debug, Display, Formatter};

#[cfg(feature = "serde")]
use serde_crate::{
    de::{Error, Visitor},
    Deserialize, Deserializer,
};

use crate::Stage;

/// A lookup string of the bell names, in order.  This is also the alphabet of place notation, so
/// the number of names bounds the largest [`Stage`] we can ring.
// - E, T stand for 11 and 12
// - I and O are missing because they could be confused with 1 and 0
// - X is missing because it denotes a cross in place notation
pub(crate) const BELL_NAMES: &str = "1234567890ETABCDFGHJKL";

/// A type-safe representation of a 'bell', which adds conversions to and from the symbols used in
/// rows and place notation.  Each `Bell` takes a single byte in memory.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Bell {
    /// A zero-indexed number representing the `Bell`.  I.e the treble is always
    /// `Bell { index: 0 }`, and the 12th is `Bell { index: 11 }` but would be
    /// [`Display`](std::fmt::Display)ed as `T`.
    index: u8,
}

impl Bell {
    /// Creates a `Bell` from a [`char`] containing a bell name (e.g. `'4'` or `'T'`).  If the name
    /// is not valid, then this fails and returns [`None`].  Lower case letters are accepted, since
    /// both rows and place notation are case-insensitive.
    ///
    /// # Example
    /// ```
    /// use touchframe::Bell;
    ///
    /// assert_eq!(Bell::from_name('1').map(Bell::number), Some(1));
    /// assert_eq!(Bell::from_name('0').map(Bell::number), Some(10));
    /// assert_eq!(Bell::from_name('t').map(Bell::number), Some(12));
    /// // 'X' means 'cross' in place notation, so is never a bell
    /// assert_eq!(Bell::from_name('X'), None);
    /// assert_eq!(Bell::from_name('&'), None);
    /// ```
    pub fn from_name(c: char) -> Option<Bell> {
        let c = c.to_ascii_uppercase();
        BELL_NAMES
            .chars()
            .position(|x| x == c)
            .map(|v| Bell::from_index(v as u8))
    }

    /// Creates a `Bell` from a 0-indexed integer.
    ///
    /// # Example
    /// ```
    /// use touchframe::Bell;
    ///
    /// assert_eq!(Bell::from_index(0).name(), "1");
    /// assert_eq!(Bell::from_index(11).name(), "T");
    /// ```
    #[inline]
    pub fn from_index(index: u8) -> Bell {
        Bell { index }
    }

    /// Creates a `Bell` from a 1-indexed integer, returning [`None`] if `number` is `0`.
    pub fn from_number(number: u8) -> Option<Bell> {
        number.checked_sub(1).map(Bell::from_index)
    }

    /// Creates the `Bell` representing the tenor or heaviest bell on a given [`Stage`].
    pub fn tenor(stage: Stage) -> Bell {
        Bell::from_index(stage.num_bells_u8() - 1)
    }

    /// A [`Bell`] representing the 'treble' on any stage.
    pub const TREBLE: Bell = Bell { index: 0 };

    /// Converts this `Bell` into the [`char`] that it should be displayed as.  If the `Bell` is
    /// too big to have a corresponding name, then [`None`] is returned.
    ///
    /// # Example
    /// ```
    /// use touchframe::Bell;
    ///
    /// assert_eq!(Bell::from_index(0).to_char(), Some('1'));
    /// assert_eq!(Bell::from_index(10).to_char(), Some('E'));
    /// assert_eq!(Bell::from_index(21).to_char(), Some('L'));
    /// assert_eq!(Bell::from_index(22).to_char(), None);
    /// ```
    pub fn to_char(self) -> Option<char> {
        BELL_NAMES.as_bytes().get(self.index()).map(|x| *x as char)
    }

    /// Returns the 0-indexed representation of this `Bell`.
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the 0-indexed representation of this `Bell`, as a [`u8`].
    #[inline]
    pub fn index_u8(self) -> u8 {
        self.index
    }

    /// Returns the 1-indexed representation of this `Bell`.
    #[inline]
    pub fn number(self) -> u8 {
        self.index + 1
    }

    /// Converts this `Bell` into a [`String`] that it should be displayed as.  Unlike
    /// [`to_char`](Bell::to_char), this does not fail if the `Bell` is to big to have a name.
    /// Instead, it returns the 1-indexed ['number'](Bell::number) of the `Bell` in angle brackets.
    ///
    /// # Example
    /// ```
    /// use touchframe::Bell;
    ///
    /// assert_eq!(Bell::from_index(9).name(), "0");
    /// assert_eq!(Bell::from_index(29).name(), "<30>");
    /// ```
    pub fn name(self) -> String {
        match self.to_char() {
            Some(c) => c.to_string(),
            None => format!("<{}>", self.number()),
        }
    }
}

impl Debug for Bell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bell({})", self)
    }
}

impl Display for Bell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_char() {
            Some(c) => write!(f, "{}", c),
            None => write!(f, "<{}>", self.number()),
        }
    }
}

///////////
// SERDE //
///////////

// Bells are deserialised from their names (e.g. `"T"`)
#[cfg(feature = "serde")]
struct BellVisitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for BellVisitor {
    type Value = Bell;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a bell name")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let mut chars = v.chars();
        match (chars.next().and_then(Bell::from_name), chars.next()) {
            (Some(bell), None) => Ok(bell),
            _ => Err(E::custom(format!("'{}' is not a bell name", v))),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Bell {
    fn deserialize<D>(deserializer: D) -> Result<Bell, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(BellVisitor)
    }
}
