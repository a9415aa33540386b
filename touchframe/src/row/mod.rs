//! Rows of bells, along with the ringing metadata that accumulates on them as they're rung.

mod errors;

use std::{
    fmt::{Debug, Display, Formatter},
    ops::Index,
};

use itertools::Itertools;

use crate::{
    call::CallType, place_not::NotationError, utils::check_duplicate_or_out_of_stage, Bell,
    Parity, PlaceNot, SizeMismatchError, Stage,
};

pub use errors::InvalidRowError;

/// The mark left on the first [`Row`] of a call, or on a [`Row`] produced by a call change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallMarker {
    /// The first [`Row`] of a bob or single
    Call(CallType),
    /// A [`Row`] made by calling this [`Bell`] up or down
    CallChange(Bell),
}

impl CallMarker {
    /// The single [`char`] used to display this marker (`-` for bobs, `S` for singles, or the
    /// name of the called [`Bell`])
    pub fn symbol(self) -> char {
        match self {
            CallMarker::Call(call) => call.row_symbol(),
            CallMarker::CallChange(bell) => bell.to_char().unwrap_or('?'),
        }
    }
}

/// A single row of ringing, i.e. an ordering of the [`Bell`]s of some [`Stage`], along with the
/// metadata of how it came to be rung.
///
/// Two `Row`s are equal if their [`Bell`]s are equal, ignoring the metadata.  If the `Row`s have
/// different [`Stage`]s, only the places they share are compared (so a method rung with a cover
/// bell compares equal to the same method rung without one).
#[derive(Clone)]
pub struct Row {
    /// **Invariant**: `bells` is a permutation of the [`Bell`]s of some valid [`Stage`]
    bells: Vec<Bell>,
    call: Option<CallMarker>,
    /// The place notation token (or call change) that produced this `Row`
    place_not: String,
    is_lead_end: bool,
    annotation: String,
}

impl Row {
    //////////////////
    // CONSTRUCTORS //
    //////////////////

    /// Creates rounds on a given [`Stage`].
    ///
    /// # Example
    /// ```
    /// use touchframe::{Row, Stage};
    ///
    /// assert_eq!(Row::rounds(Stage::DOUBLES).to_string(), "12345");
    /// assert_eq!(Row::rounds(Stage::MAXIMUS).to_string(), "1234567890ET");
    /// ```
    pub fn rounds(stage: Stage) -> Row {
        Row::from_bells_unchecked(stage.bells().collect())
    }

    /// Parse a string into a `Row`, skipping any [`char`]s that aren't valid bell names.
    ///
    /// # Example
    /// ```
    /// use touchframe::{Bell, InvalidRowError, Row, Stage};
    ///
    /// assert_eq!(Row::parse("13524")?.to_string(), "13524");
    /// assert_eq!(Row::parse("1 3 2 e t 0 9 8 7 6 5 4")?.to_string(), "132ET0987654");
    /// assert_eq!(
    ///     Row::parse("12745"),
    ///     Err(InvalidRowError::BellOutOfStage(Bell::from_name('7').unwrap(), Stage::DOUBLES))
    /// );
    /// # Ok::<(), InvalidRowError>(())
    /// ```
    pub fn parse(s: &str) -> Result<Row, InvalidRowError> {
        Row::from_bells(s.chars().filter_map(Bell::from_name).collect())
    }

    /// Creates a `Row` from a [`Vec`] of [`Bell`]s, checking that they form a permutation.
    pub fn from_bells(bells: Vec<Bell>) -> Result<Row, InvalidRowError> {
        let num_bells =
            u8::try_from(bells.len()).map_err(|_| InvalidRowError::TooManyBells(bells.len()))?;
        let stage = Stage::try_from(num_bells)?;
        check_duplicate_or_out_of_stage(bells.iter().copied(), stage)?;
        Ok(Row::from_bells_unchecked(bells))
    }

    fn from_bells_unchecked(bells: Vec<Bell>) -> Row {
        Row {
            bells,
            call: None,
            place_not: String::new(),
            is_lead_end: false,
            annotation: String::new(),
        }
    }

    /////////////
    // GETTERS //
    /////////////

    /// The [`Stage`] of this `Row`.
    pub fn stage(&self) -> Stage {
        // `bells` always has between 1 and `Stage::MAX` bells
        Stage::new(self.bells.len() as u8)
    }

    /// An [`Iterator`] over the [`Bell`]s in this `Row`, from lead to back.
    pub fn bell_iter(&self) -> impl DoubleEndedIterator<Item = Bell> + '_ {
        self.bells.iter().copied()
    }

    /// The (0-indexed) place of a given [`Bell`] in this `Row`.
    pub fn place_of(&self, bell: Bell) -> Option<usize> {
        self.bells.iter().position(|&b| b == bell)
    }

    /// Returns `true` if this `Row` is rounds (on any [`Stage`]).
    pub fn is_rounds(&self) -> bool {
        self.bell_iter().enumerate().all(|(i, b)| b.index() == i)
    }

    pub fn call(&self) -> Option<CallMarker> {
        self.call
    }

    pub fn place_not(&self) -> &str {
        &self.place_not
    }

    pub fn is_lead_end(&self) -> bool {
        self.is_lead_end
    }

    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    /// Returns a [`Display`]able wrapper which shows this `Row` with all its metadata.
    pub fn full(&self) -> FullRow<'_> {
        FullRow(self)
    }

    /////////////
    // SETTERS //
    /////////////

    pub fn set_call(&mut self, call: Option<CallMarker>) {
        self.call = call;
    }

    pub fn set_place_not(&mut self, place_not: String) {
        self.place_not = place_not;
    }

    pub fn set_lead_end(&mut self, is_lead_end: bool) {
        self.is_lead_end = is_lead_end;
    }

    pub fn set_annotation(&mut self, annotation: impl Into<String>) {
        self.annotation = annotation.into();
    }

    /// Swaps two [`Bell`]s in this `Row`.
    ///
    /// # Panics
    ///
    /// Panics if either place is outside the `Row`.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.bells.swap(a, b);
    }

    /////////////////////////
    // PERMUTATION ALGEBRA //
    /////////////////////////

    /// Permute `self` by a transposition, returning the next [`Row`] to be rung.  The `Bell` in
    /// place `i` of the result is `self[transposition[i]]`, and places beyond the end of
    /// `transposition` are copied unchanged from `self` (i.e. extra bells cover).
    ///
    /// The result takes its call marker, place notation and lead end flag from `transposition`,
    /// and has no annotation.
    ///
    /// # Example
    /// ```
    /// use touchframe::Row;
    ///
    /// let row = Row::parse("13524")?;
    /// assert_eq!(row.compose(&Row::parse("21354")?)?.to_string(), "31542");
    /// // Extra bells cover
    /// assert_eq!(Row::parse("132546")?.compose(&Row::parse("21")?)?.to_string(), "312546");
    /// // ... but the transposition can't be bigger than the row
    /// assert!(Row::parse("12")?.compose(&row).is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn compose(&self, transposition: &Row) -> Result<Row, SizeMismatchError> {
        SizeMismatchError::test_covers(self.stage(), transposition.stage())?;
        let bells = transposition
            .bell_iter()
            .map(|b| self.bells[b.index()])
            .chain(self.bells[transposition.bells.len()..].iter().copied())
            .collect_vec();
        Ok(Row {
            bells,
            call: transposition.call,
            place_not: transposition.place_not.clone(),
            is_lead_end: transposition.is_lead_end,
            annotation: String::new(),
        })
    }

    /// Apply a single token of place notation to this `Row` in-place, recording the token as this
    /// `Row`'s place notation.
    ///
    /// # Example
    /// ```
    /// use touchframe::{Row, Stage};
    ///
    /// let mut row = Row::rounds(Stage::DOUBLES);
    /// row.apply_notation("5")?;
    /// assert_eq!(row.to_string(), "21435");
    /// row.apply_notation("1")?;
    /// assert_eq!(row.to_string(), "24153");
    /// assert_eq!(row.place_not(), "1");
    /// assert!(row.apply_notation("114").is_err());
    /// # Ok::<(), touchframe::place_not::NotationError>(())
    /// ```
    pub fn apply_notation(&mut self, token: &str) -> Result<(), NotationError> {
        let pn = PlaceNot::parse(token, self.stage())?;
        pn.permute_unchecked(self);
        self.place_not = pn.token().to_owned();
        Ok(())
    }

    /// Computes the [`Parity`] of this `Row`, by counting the swaps needed to sort it back into
    /// rounds.
    pub fn parity(&self) -> Parity {
        let mut bells = self.bells.clone();
        let mut num_swaps = 0;
        let mut first_unsorted = 0;
        while first_unsorted < bells.len() {
            let cur_bell = bells[first_unsorted];
            if cur_bell.index() == first_unsorted {
                first_unsorted += 1;
            } else {
                bells.swap(first_unsorted, cur_bell.index());
                num_swaps += 1;
            }
        }
        Parity::from_number(num_swaps)
    }

    /// The smallest number of times this `Row` has to be composed with itself before it returns
    /// to rounds.  Rounds has order 1.
    ///
    /// # Example
    /// ```
    /// use touchframe::Row;
    ///
    /// assert_eq!(Row::parse("12345")?.cyclic_order(), 1);
    /// assert_eq!(Row::parse("13524")?.cyclic_order(), 4);
    /// assert_eq!(Row::parse("23154")?.cyclic_order(), 6);
    /// # Ok::<(), touchframe::InvalidRowError>(())
    /// ```
    pub fn cyclic_order(&self) -> usize {
        let mut accum = self.bells.clone();
        let mut count = 1;
        while !accum.iter().enumerate().all(|(i, b)| b.index() == i) {
            accum = self.bells.iter().map(|b| accum[b.index()]).collect();
            count += 1;
        }
        count
    }

    /// Perform a call change: move `bell` so that it follows `follow` (or to lead if `follow` is
    /// `None`), shifting the bells in between by one place.  If `bell` already follows `follow`,
    /// nothing changes.
    ///
    /// # Example
    /// ```
    /// use touchframe::{Bell, Row};
    ///
    /// let bell = |c| Bell::from_name(c).unwrap();
    /// let mut row = Row::parse("123456")?;
    /// row.call_change(bell('5'), Some(bell('2')))?; // call down
    /// assert_eq!(row.to_string(), "125346");
    /// row.call_change(bell('1'), Some(bell('4')))?; // call up
    /// assert_eq!(row.to_string(), "253416");
    /// row.call_change(bell('4'), None)?; // call to lead
    /// assert_eq!(row.to_string(), "425316");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn call_change(&mut self, bell: Bell, follow: Option<Bell>) -> Result<(), NotationError> {
        let stage = self.stage();
        let place_of = |b: Bell| {
            self.place_of(b)
                .ok_or(NotationError::BellOutOfStage { bell: b, stage })
        };
        let from = place_of(bell)?;
        let to = match follow {
            None => 0,
            Some(follow) => {
                let follow_place = place_of(follow)?;
                if from > follow_place {
                    follow_place + 1 // Calling down
                } else {
                    follow_place // Calling up, so `follow` will shift down by one
                }
            }
        };
        if from != to && Some(bell) != follow {
            let bell = self.bells.remove(from);
            self.bells.insert(to, bell);
        }
        Ok(())
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Row) -> bool {
        self.bells.iter().zip(&other.bells).all(|(a, b)| a == b)
    }
}

impl Index<usize> for Row {
    type Output = Bell;

    fn index(&self, index: usize) -> &Bell {
        &self.bells[index]
    }
}

impl Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row({})", self)
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for b in &self.bells {
            write!(f, "{}", b)?;
        }
        Ok(())
    }
}

/// A wrapper over a [`Row`] which [`Display`]s it along with its metadata, as
/// `<call> <bells><*> <place notation>` where `*` marks a lead end.
///
/// ```
/// use touchframe::{call::CallType, row::CallMarker, Row};
///
/// let mut row = Row::parse("12354")?;
/// row.set_place_not("145".to_owned());
/// row.set_call(Some(CallMarker::Call(CallType::Bob)));
/// row.set_lead_end(true);
/// assert_eq!(row.full().to_string(), "- 12354* 145");
/// # Ok::<(), touchframe::InvalidRowError>(())
/// ```
#[derive(Clone, Copy)]
pub struct FullRow<'r>(&'r Row);

impl Display for FullRow<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let row = self.0;
        let call = row.call.map_or(' ', CallMarker::symbol);
        let lead_end = if row.is_lead_end { '*' } else { ' ' };
        write!(f, "{} {}{}", call, row, lead_end)?;
        if !row.place_not.is_empty() {
            write!(f, " {}", row.place_not)?;
        }
        Ok(())
    }
}
