//! A representation of a stage, with human-friendly `const`s and display names.

use std::{
    convert::TryFrom,
    fmt::{Debug, Display, Formatter},
};

#[cfg(feature = "serde")]
use serde_crate::{
    de::{Error, Visitor},
    Deserialize, Deserializer,
};

use crate::{bell::BELL_NAMES, Bell};

/// A newtype over [`u8`] that represents a stage (i.e. a number of bells).  Every [`Bell`] in a
/// `Stage` must have a name, so `Stage`s range from one bell up to [`Stage::MAX`].
///
/// ```
/// use touchframe::Stage;
///
/// assert_eq!(Stage::SINGLES, Stage::new(3));
/// assert_eq!(Stage::MAJOR, Stage::new(8));
/// assert_eq!(Stage::MAXIMUS.to_string(), "Maximus");
/// assert!(Stage::try_from(0).is_err());
/// assert!(Stage::try_from(23).is_err());
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Stage(u8);

impl Stage {
    /// Creates a new `Stage` representing a given number of [`Bell`]s.
    ///
    /// # Panics
    ///
    /// Panics if `num_bells` is zero or larger than [`Stage::MAX`].
    #[track_caller]
    pub fn new(num_bells: u8) -> Stage {
        match Self::try_from(num_bells) {
            Ok(stage) => stage,
            Err(e) => panic!("{}", e),
        }
    }

    /// The number of [`Bell`]s in this [`Stage`].  This is guaranteed to be non-zero.
    #[inline(always)]
    pub fn num_bells(self) -> usize {
        self.0 as usize
    }

    /// The number of [`Bell`]s in this [`Stage`] as a [`u8`].
    #[inline(always)]
    pub fn num_bells_u8(self) -> u8 {
        self.0
    }

    /// Returns the highest numbered [`Bell`] in this `Stage`
    pub fn tenor(self) -> Bell {
        Bell::tenor(self)
    }

    /// Gets an [`Iterator`] over the [`Bell`]s contained within this `Stage`, in increasing order.
    pub fn bells(self) -> impl DoubleEndedIterator<Item = Bell> {
        (0..self.num_bells_u8()).map(Bell::from_index)
    }

    /// Returns true if this `Stage` denotes an even number of [`Bell`]s
    #[inline(always)]
    pub fn is_even(self) -> bool {
        self.num_bells() % 2 == 0
    }

    /// Returns the `Stage` with one more bell than `self`, if it exists.  This is the stage a
    /// method is rung on when a cover bell is added.
    pub fn with_cover(self) -> Option<Stage> {
        Stage::try_from(self.0 + 1).ok()
    }

    /// Creates a [`Stage`] from the lower case version of the human-friendly name (e.g.
    /// `"royal"`, `"triples"` or `"twenty-two"`).
    pub fn from_lower_case_name(name: &str) -> Option<Stage> {
        Some(match name {
            "one" => Stage::ONE,
            "two" => Stage::TWO,
            "singles" => Stage::SINGLES,
            "minimus" => Stage::MINIMUS,

            "doubles" => Stage::DOUBLES,
            "minor" => Stage::MINOR,
            "triples" => Stage::TRIPLES,
            "major" => Stage::MAJOR,

            "caters" => Stage::CATERS,
            "royal" => Stage::ROYAL,
            "cinques" => Stage::CINQUES,
            "maximus" => Stage::MAXIMUS,

            "sextuples" => Stage::SEXTUPLES,
            "fourteen" => Stage::FOURTEEN,
            "septuples" => Stage::SEPTUPLES,
            "sixteen" => Stage::SIXTEEN,

            "octuples" => Stage(17),
            "eighteen" => Stage(18),
            "nonuples" => Stage(19),
            "twenty" => Stage(20),

            "decuples" => Stage(21),
            "twenty-two" => Stage(22),

            _ => return None,
        })
    }

    /// Gets the human-friendly name of this [`Stage`], as would be used in method titles.
    pub fn name(self) -> &'static str {
        match self.0 {
            1 => "One",
            2 => "Two",
            3 => "Singles",
            4 => "Minimus",

            5 => "Doubles",
            6 => "Minor",
            7 => "Triples",
            8 => "Major",

            9 => "Caters",
            10 => "Royal",
            11 => "Cinques",
            12 => "Maximus",

            13 => "Sextuples",
            14 => "Fourteen",
            15 => "Septuples",
            16 => "Sixteen",

            17 => "Octuples",
            18 => "Eighteen",
            19 => "Nonuples",
            20 => "Twenty",

            21 => "Decuples",
            _ => "Twenty-two",
        }
    }
}

/// User-friendly constants for commonly used `Stage`s.
impl Stage {
    /// A `Stage` with `1` 'working' bell
    pub const ONE: Stage = Stage(1);
    /// A `Stage` with `2` working bells
    pub const TWO: Stage = Stage(2);
    /// A `Stage` with `3` working bells
    pub const SINGLES: Stage = Stage(3);
    /// A `Stage` with `4` working bells
    pub const MINIMUS: Stage = Stage(4);
    /// A `Stage` with `5` working bells
    pub const DOUBLES: Stage = Stage(5);
    /// A `Stage` with `6` working bells
    pub const MINOR: Stage = Stage(6);
    /// A `Stage` with `7` working bells
    pub const TRIPLES: Stage = Stage(7);
    /// A `Stage` with `8` working bells
    pub const MAJOR: Stage = Stage(8);
    /// A `Stage` with `9` working bells
    pub const CATERS: Stage = Stage(9);
    /// A `Stage` with `10` working bells
    pub const ROYAL: Stage = Stage(10);
    /// A `Stage` with `11` working bells
    pub const CINQUES: Stage = Stage(11);
    /// A `Stage` with `12` working bells
    pub const MAXIMUS: Stage = Stage(12);
    /// A `Stage` with `13` working bells
    pub const SEXTUPLES: Stage = Stage(13);
    /// A `Stage` with `14` working bells
    pub const FOURTEEN: Stage = Stage(14);
    /// A `Stage` with `15` working bells
    pub const SEPTUPLES: Stage = Stage(15);
    /// A `Stage` with `16` working bells
    pub const SIXTEEN: Stage = Stage(16);

    /// The largest `Stage` whose bells all have names
    pub const MAX: Stage = Stage(BELL_NAMES.len() as u8);
}

impl Debug for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stage({})", self.0)
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u8> for Stage {
    type Error = InvalidStageError;

    fn try_from(num_bells: u8) -> Result<Self, Self::Error> {
        if num_bells == 0 || num_bells > Stage::MAX.0 {
            Err(InvalidStageError(num_bells))
        } else {
            Ok(Stage(num_bells))
        }
    }
}

/// Splits a method title into its base name and its [`Stage`], e.g. `"Plain Bob Doubles"` becomes
/// `("Plain Bob", Some(Stage::DOUBLES))`.  Titles which don't end in a stage name are returned
/// whole.
///
/// ```
/// use touchframe::{split_method_title, Stage};
///
/// assert_eq!(split_method_title("Plain Bob Doubles"), ("Plain Bob", Some(Stage::DOUBLES)));
/// assert_eq!(split_method_title("Grandsire"), ("Grandsire", None));
/// ```
pub fn split_method_title(title: &str) -> (&str, Option<Stage>) {
    let title = title.trim();
    let (name, last_word) = match title.rsplit_once(' ') {
        Some(split) => split,
        None => return (title, None),
    };
    match Stage::from_lower_case_name(&last_word.to_lowercase()) {
        Some(stage) => (name.trim_end(), Some(stage)),
        None => (title, None),
    }
}

/// An error created when attempting to create a [`Stage`] of zero bells, or of more bells than
/// there are bell names.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct InvalidStageError(pub u8);

impl Display for InvalidStageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Can't create a `Stage` of {} bells (stages must have 1 to {} bells)",
            self.0, Stage::MAX.0
        )
    }
}

impl std::error::Error for InvalidStageError {}

/////////////////////////
// `SizeMismatchError` //
/////////////////////////

/// An error created when a [`Row`](crate::Row) was used to permute something too small for it,
/// or when a [`Block`](crate::Block) is given a row of the wrong [`Stage`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SizeMismatchError {
    /// The [`Stage`] of the thing being permuted or appended to
    pub lhs_stage: Stage,
    /// The [`Stage`] of the thing doing the permuting, or being appended
    pub rhs_stage: Stage,
}

impl SizeMismatchError {
    /// Returns `Ok(())` if `rhs_stage` can act on `lhs_stage` (i.e. it has the same number or fewer
    /// bells, leaving any extras to cover).
    pub fn test_covers(lhs_stage: Stage, rhs_stage: Stage) -> Result<(), Self> {
        if rhs_stage <= lhs_stage {
            Ok(())
        } else {
            Err(SizeMismatchError {
                lhs_stage,
                rhs_stage,
            })
        }
    }

    /// Returns `Ok(())` if the [`Stage`]s are equal.
    pub fn test_eq(lhs_stage: Stage, rhs_stage: Stage) -> Result<(), Self> {
        if lhs_stage == rhs_stage {
            Ok(())
        } else {
            Err(SizeMismatchError {
                lhs_stage,
                rhs_stage,
            })
        }
    }
}

impl Display for SizeMismatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Incompatible stages: {} bells (lhs), {} bells (rhs)",
            self.lhs_stage.0, self.rhs_stage.0
        )
    }
}

impl std::error::Error for SizeMismatchError {}

///////////
// SERDE //
///////////

// Stage will deserialise from either a name (i.e. a string) or a non-negative number.
#[cfg(feature = "serde")]
struct StageVisitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for StageVisitor {
    type Value = Stage;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a positive integer, or a stage name")
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let v = u64::try_from(v).map_err(|_| E::custom(format!("negative stage: {}", v)))?;
        self.visit_u64(v)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let num_bells =
            u8::try_from(v).map_err(|_| E::custom(format!("stage is too large: {}", v)))?;
        Stage::try_from(num_bells).map_err(E::custom)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Stage::from_lower_case_name(&v.to_lowercase())
            .ok_or_else(|| E::custom(format!("'{}' is not a stage name", v)))
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Stage {
    fn deserialize<D>(deserializer: D) -> Result<Stage, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StageVisitor)
    }
}

//////////////////
// TESTING CODE //
//////////////////

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[cfg(test)]
impl Arbitrary for Stage {
    fn arbitrary(gen: &mut Gen) -> Self {
        // Fold every `u8` onto a valid stage.  This isn't uniform, but the point is to generate
        // useful test cases rather than to be fair.
        let num_bells = u8::arbitrary(gen) % Stage::MAX.0 + 1;
        Self::new(num_bells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(Stage::try_from(0), Err(InvalidStageError(0)));
        assert_eq!(Stage::try_from(1), Ok(Stage::ONE));
        assert_eq!(Stage::try_from(22), Ok(Stage::MAX));
        assert_eq!(Stage::try_from(23), Err(InvalidStageError(23)));
        assert_eq!(Stage::MAX.num_bells(), 22);
    }

    #[test]
    fn names_round_trip() {
        for n in 1..=Stage::MAX.num_bells_u8() {
            let stage = Stage::new(n);
            let lower = stage.name().to_lowercase();
            assert_eq!(Stage::from_lower_case_name(&lower), Some(stage));
        }
    }

    #[test]
    fn split_titles() {
        #[track_caller]
        fn check(title: &str, exp_name: &str, exp_stage: Option<Stage>) {
            assert_eq!(split_method_title(title), (exp_name, exp_stage));
        }

        check("Plain Bob Doubles", "Plain Bob", Some(Stage::DOUBLES));
        check("Cambridge Surprise Major", "Cambridge Surprise", Some(Stage::MAJOR));
        check("Stedman triples", "Stedman", Some(Stage::TRIPLES));
        check("  Grandsire Caters ", "Grandsire", Some(Stage::CATERS));
        check("Original", "Original", None);
        check("Little Bob", "Little Bob", None);
    }

    #[test]
    fn covers() {
        assert!(SizeMismatchError::test_covers(Stage::MINOR, Stage::DOUBLES).is_ok());
        assert!(SizeMismatchError::test_covers(Stage::MINOR, Stage::MINOR).is_ok());
        assert_eq!(
            SizeMismatchError::test_covers(Stage::DOUBLES, Stage::MINOR),
            Err(SizeMismatchError {
                lhs_stage: Stage::DOUBLES,
                rhs_stage: Stage::MINOR
            })
        );
        assert_eq!(Stage::DOUBLES.with_cover(), Some(Stage::MINOR));
        assert_eq!(Stage::MAX.with_cover(), None);
    }

    #[quickcheck_macros::quickcheck]
    fn arbitrary_stages_are_valid(stage: Stage) -> bool {
        stage >= Stage::ONE && stage <= Stage::MAX
    }
}
