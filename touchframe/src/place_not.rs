//! Module for parsing and handling place notation

use std::fmt::{Debug, Display, Formatter};

use itertools::Itertools;

use crate::{utils::strip_whitespace, Bell, Row, SizeMismatchError, Stage};

/// All the ways that place notation (or the call changes which sit alongside it) can be invalid
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum NotationError {
    /// The notation contained no place notation at all
    Empty,
    /// A [`char`] that is neither a [`Bell`] name nor any of `X-.,&+` was found in a token
    InvalidSymbol { token: String, symbol: char },
    /// A token names a place above the [`Stage`] being rung (e.g. `18` on Doubles)
    PlaceOutOfStage {
        token: String,
        place: Bell,
        stage: Stage,
    },
    /// A token names the same place twice (e.g. `114`)
    DuplicatePlace { token: String, place: Bell },
    /// A `,`-separated segment contained no place notation (e.g. the second segment of
    /// `x14,,12`, or a lone `&`).  The argument is the index of the segment.
    EmptySegment(usize),
    /// A `&` or `+` was found somewhere other than the start of a segment
    MisplacedSymmetry { segment: String, symbol: char },
    /// The text after a `<` isn't a number
    InvalidOffset(String),
    /// Plain hunt needs at least two bells
    HuntStageTooSmall(Stage),
    /// A call change named a [`Bell`] that isn't being rung
    BellOutOfStage { bell: Bell, stage: Stage },
}

impl Display for NotationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NotationError::Empty => write!(f, "No place notation given."),
            NotationError::InvalidSymbol { token, symbol } => {
                write!(f, "Invalid symbol {:?} in place notation '{}'", symbol, token)
            }
            NotationError::PlaceOutOfStage {
                token,
                place,
                stage,
            } => write!(
                f,
                "Place '{}' in '{}' is out of stage {}",
                place, token, stage
            ),
            NotationError::DuplicatePlace { token, place } => {
                write!(f, "Place '{}' is duplicated in '{}'", place, token)
            }
            NotationError::EmptySegment(idx) => {
                write!(f, "Segment #{} of the place notation is empty", idx + 1)
            }
            NotationError::MisplacedSymmetry { segment, symbol } => write!(
                f,
                "'{}' is not at the start of the segment '{}'",
                symbol, segment
            ),
            NotationError::InvalidOffset(s) => {
                write!(f, "Can't parse {:?} as a lead offset", s)
            }
            NotationError::HuntStageTooSmall(stage) => {
                write!(f, "Can't ring plain hunt on {} bell(s)", stage.num_bells())
            }
            NotationError::BellOutOfStage { bell, stage } => {
                write!(f, "Bell '{}' isn't rung on {}", bell, stage)
            }
        }
    }
}

impl std::error::Error for NotationError {}

/// A single piece of place notation on any [`Stage`].
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct PlaceNot {
    /// The upper-case token this was parsed from.  Crosses are always stored as `"X"`.
    token: String,
    /// The **0-indexed** places `p` where the bells in `p` and `p + 1` swap, in ascending order.
    /// Every other place is made.
    swaps: Vec<u8>,
    /// The [`Stage`] that this `PlaceNot` is intended to be used for.
    stage: Stage,
}

impl PlaceNot {
    /// Parse a single token of place notation (e.g. `"14"`, `"x"` or `"-"`) on a given [`Stage`].
    ///
    /// Every bell named in the token makes a place, and the remaining bells swap in pairs from
    /// the front (never re-using a place that's already part of a swap).  So on Doubles, `"3"`
    /// swaps 1-2 and 4-5 whilst `"1"` swaps 2-3 and 4-5.  `X` and `-` are the full cross, which
    /// also exists on odd stages (where the back bell lies still).
    ///
    /// # Example
    /// ```
    /// use touchframe::{place_not::NotationError, PlaceNot, Stage};
    ///
    /// assert_eq!(PlaceNot::parse("3", Stage::DOUBLES)?.transposition().to_string(), "21354");
    /// assert_eq!(PlaceNot::parse("x", Stage::MINOR)?.transposition().to_string(), "214365");
    /// assert_eq!(PlaceNot::parse("-", Stage::DOUBLES)?.transposition().to_string(), "21435");
    /// assert!(matches!(
    ///     PlaceNot::parse("18", Stage::DOUBLES),
    ///     Err(NotationError::PlaceOutOfStage { .. })
    /// ));
    /// # Ok::<(), NotationError>(())
    /// ```
    pub fn parse(token: &str, stage: Stage) -> Result<Self, NotationError> {
        let token = strip_whitespace(token).to_ascii_uppercase();
        match token.as_str() {
            "" => return Err(NotationError::Empty),
            "X" | "-" => return Ok(Self::cross(stage)),
            _ => {}
        }

        let mut is_place = vec![false; stage.num_bells()];
        for symbol in token.chars() {
            let place = Bell::from_name(symbol).ok_or_else(|| NotationError::InvalidSymbol {
                token: token.clone(),
                symbol,
            })?;
            match is_place.get_mut(place.index()) {
                None => {
                    return Err(NotationError::PlaceOutOfStage {
                        token: token.clone(),
                        place,
                        stage,
                    })
                }
                Some(&mut true) => {
                    return Err(NotationError::DuplicatePlace {
                        token: token.clone(),
                        place,
                    })
                }
                Some(x) => *x = true,
            }
        }

        // Greedily pair up adjacent bells which aren't making places
        let mut swaps = Vec::new();
        let mut p = 0;
        while p + 1 < is_place.len() {
            if is_place[p] || is_place[p + 1] {
                p += 1;
            } else {
                swaps.push(p as u8);
                p += 2;
            }
        }

        Ok(PlaceNot {
            token,
            swaps,
            stage,
        })
    }

    /// Returns a new `PlaceNot` representing the 'cross' notation on a given stage.  On odd
    /// stages, the back bell makes a place.
    pub fn cross(stage: Stage) -> Self {
        PlaceNot {
            token: "X".to_owned(),
            swaps: (0..stage.num_bells_u8().saturating_sub(1)).step_by(2).collect(),
            stage,
        }
    }

    /// The token this `PlaceNot` was parsed from, in upper case.
    #[inline(always)]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the [`Stage`] of this `PlaceNot`
    #[inline(always)]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns an [`Iterator`] over the places made by this `PlaceNot`, including the implicit
    /// ones.
    pub fn places(&self) -> impl Iterator<Item = Bell> + '_ {
        self.stage.bells().filter(move |b| {
            let i = b.index_u8();
            !self.swaps.iter().any(|&s| s == i || s + 1 == i)
        })
    }

    /// Returns a [`Row`] representing the same transposition as this `PlaceNot`.  The [`Row`]
    /// remembers the token that created it.
    pub fn transposition(&self) -> Row {
        let mut row = Row::rounds(self.stage);
        self.permute_unchecked(&mut row);
        row.set_place_not(self.token.clone());
        row
    }

    /// Uses this `PlaceNot` to perform an in-place permutation of a given [`Row`].  The [`Row`]
    /// can have more bells than `self`, in which case the extra bells cover.
    pub fn permute(&self, row: &mut Row) -> Result<(), SizeMismatchError> {
        SizeMismatchError::test_covers(row.stage(), self.stage)?;
        self.permute_unchecked(row);
        Ok(())
    }

    /// Like [`PlaceNot::permute`], but assumes that `row` has at least as many bells as `self`.
    pub(crate) fn permute_unchecked(&self, row: &mut Row) {
        for &p in &self.swaps {
            row.swap(p as usize, p as usize + 1);
        }
    }
}

impl Debug for PlaceNot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlaceNot({})", self)
    }
}

impl Display for PlaceNot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token)
    }
}

/// A contiguous block of [`PlaceNot`]s, fully expanded (i.e. with palindromic segments already
/// mirrored).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PnBlock {
    /// **Invariant**: `pns` is never empty, and all its [`PlaceNot`]s have the same [`Stage`]
    pns: Vec<PlaceNot>,
}

// PnBlocks can't have zero length, so `is_empty` is unnecessary
#[allow(clippy::len_without_is_empty)]
impl PnBlock {
    /// Parse a string of place notation into a `PnBlock`.
    ///
    /// - Tokens are separated by `.`, and `X`/`-` separate themselves (so `x14x` is `X.14.X`).
    /// - `,` splits the notation into segments which are concatenated in order.
    /// - A segment starting with `&` is palindromic: its tokens are rung forwards, then the last
    ///   token (the half-lead) once, then the other tokens backwards.  A segment starting with `+`
    ///   is explicitly asymmetric, which is the same as having no prefix.
    /// - Case and whitespace don't matter.
    ///
    /// Parsing is all or nothing: the first invalid token aborts the whole parse.
    ///
    /// # Example
    /// ```
    /// use touchframe::{PnBlock, Stage};
    ///
    /// let plain_bob = PnBlock::parse("&x16x16x16,12", Stage::MINOR)?;
    /// assert_eq!(plain_bob.len(), 12);
    /// assert_eq!(plain_bob.to_string(), "X.16.X.16.X.16.X.16.X.16.X.12");
    /// # Ok::<(), touchframe::place_not::NotationError>(())
    /// ```
    pub fn parse(s: &str, stage: Stage) -> Result<Self, NotationError> {
        let s = strip_whitespace(s);
        if s.is_empty() {
            return Err(NotationError::Empty);
        }
        let mut pns = Vec::new();
        for (idx, segment) in s.split(',').enumerate() {
            Self::parse_segment(segment, idx, stage, &mut pns)?;
        }
        Ok(PnBlock { pns })
    }

    /// Parse one `,`-separated segment onto the end of `pns`, mirroring it if it starts with `&`.
    fn parse_segment(
        segment: &str,
        idx: usize,
        stage: Stage,
        pns: &mut Vec<PlaceNot>,
    ) -> Result<(), NotationError> {
        let (is_palindrome, body) = match segment.strip_prefix('&') {
            Some(body) => (true, body),
            None => (false, segment.strip_prefix('+').unwrap_or(segment)),
        };
        if let Some(symbol) = body.chars().find(|c| matches!(c, '&' | '+')) {
            return Err(NotationError::MisplacedSymmetry {
                segment: segment.to_owned(),
                symbol,
            });
        }

        let start = pns.len();
        for token in tokenise(body) {
            pns.push(PlaceNot::parse(&token, stage)?);
        }
        if pns.len() == start {
            return Err(NotationError::EmptySegment(idx));
        }
        if is_palindrome {
            let forward = pns[start..pns.len() - 1].to_vec();
            pns.extend(forward.into_iter().rev());
        }
        Ok(())
    }

    /// Returns an iterator over the [`PlaceNot`]s contained in this `PnBlock`
    #[inline]
    pub fn place_nots(&self) -> std::slice::Iter<PlaceNot> {
        self.pns.iter()
    }

    /// The [`Stage`] of this `PnBlock`.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.pns[0].stage
    }

    /// The number of [`PlaceNot`]s in this `PnBlock`.  This is also the number of rows that
    /// [`Block::expand_place_notation`](crate::Block::expand_place_notation) appends.
    #[inline]
    pub fn len(&self) -> usize {
        self.pns.len()
    }

    /// The transposition generated by each [`PlaceNot`], in order
    pub fn transpositions(&self) -> impl Iterator<Item = Row> + '_ {
        self.pns.iter().map(PlaceNot::transposition)
    }
}

impl Display for PnBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pns.iter().join("."))
    }
}

/// Split a single segment into tokens.  `.` separates tokens, and crosses are always a token of
/// their own.  Empty tokens are dropped, so `x.14..x` is the same as `x14x`.
fn tokenise(segment: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in segment.chars() {
        match c {
            '.' => {}
            'X' | 'x' | '-' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push("X".to_owned());
                continue;
            }
            _ => {
                current.push(c);
                continue;
            }
        }
        if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Generates the palindromic place notation for one plain course of plain hunt on a given
/// [`Stage`].  The result always parses on that [`Stage`].
///
/// ```
/// use touchframe::{place_not::plain_hunt_notation, Stage};
///
/// assert_eq!(plain_hunt_notation(Stage::DOUBLES), "&5.1.5.1.5,1");
/// assert_eq!(plain_hunt_notation(Stage::MINOR), "&x16x16x16,1");
/// ```
pub fn plain_hunt_notation(stage: Stage) -> String {
    let n = stage.num_bells();
    let tenor = stage.tenor();
    if stage.is_even() {
        format!("&{},1", format!("x1{}", tenor).repeat(n / 2))
    } else {
        format!("&{}{},1", format!("{}.1.", tenor).repeat((n - 1) / 2), tenor)
    }
}
