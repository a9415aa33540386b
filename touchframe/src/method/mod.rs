//! Methods, and the ringing of plain leads, plain courses and touches.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use crate::{
    call::{parse_touch, CallType, TouchError},
    config::NonTerminatingMethodError,
    place_not::NotationError,
    utils::strip_whitespace,
    Block, Config, Row, SizeMismatchError, Stage,
};

mod def;
mod touch;

pub use def::MethodDef;

use self::touch::TouchState;

/// The definition of a 'method' within Change Ringing.  A `Method` consists of one or more plain
/// lead [`Block`]s (more than one only for methods like Stedman, whose repeating unit is made of
/// several different 'leads'), along with the [`Block`]s used for each kind of call.
///
/// A `Method` is read-only once it has been built, and can ring onto any number of [`Block`]s.
#[derive(Debug, Clone)]
pub struct Method {
    name: String,
    stage: Stage,
    /// The normalised (upper case, no whitespace) place notation, including any `<offset`
    place_notation: String,
    /// The changes of each lead part.  **Invariant**: non-empty, and each lead part is non-empty.
    plain_leads: Vec<Block>,
    /// The length of the first lead part
    lead_len: usize,
    /// **Invariant**: `offset < lead_len`
    offset: usize,
    /// **Invariant**: `1 <= calling_position <= lead_len`
    calling_position: usize,
    /// One [`Block`] per lead part for each [`CallType`] that has been defined.
    calls: BTreeMap<CallType, Vec<Block>>,
    call_notation: BTreeMap<CallType, String>,
}

impl Method {
    //////////////////
    // CONSTRUCTORS //
    //////////////////

    /// Parses some place notation into a `Method` with no calls.
    ///
    /// The notation can be split into lead parts with `|`, and can end with `<n` to make each lead
    /// start `n` rows into the first lead part.  Whitespace and case are ignored.
    ///
    /// # Example
    /// ```
    /// use touchframe::{Method, Stage};
    ///
    /// let plain_bob = Method::new("Plain Bob", Stage::DOUBLES, "&5.1.5.1.5,125")?;
    /// assert_eq!(plain_bob.title(), "Plain Bob Doubles");
    /// assert_eq!(plain_bob.lead_len(), 10);
    ///
    /// let stedman = Method::new("Stedman", Stage::DOUBLES, "3.1.3.1.3 | 1.3.1.3.1 <3")?;
    /// assert_eq!(stedman.num_lead_parts(), 2);
    /// assert_eq!(stedman.lead_len(), 5);
    /// assert_eq!(stedman.offset(), 3);
    /// # Ok::<(), touchframe::place_not::NotationError>(())
    /// ```
    pub fn new(
        name: impl Into<String>,
        stage: Stage,
        place_notation: &str,
    ) -> Result<Self, NotationError> {
        let name = name.into();
        let place_notation = strip_whitespace(place_notation).to_ascii_uppercase();

        let (body, offset) = match place_notation.split_once('<') {
            Some((body, offset_str)) => (body, parse_offset(offset_str)?),
            None => (place_notation.as_str(), 0),
        };

        let mut plain_leads = Vec::new();
        for part in body.split('|') {
            let mut lead = Block::from_place_notation(part, stage)?;
            lead.last_row_mut().set_lead_end(true);
            lead.set_lead_len(lead.len());
            plain_leads.push(lead);
        }
        // `PnBlock`s are never empty, so every lead part has at least one row
        let lead_len = plain_leads[0].len();

        log::debug!(
            "Parsed {} {} ({} lead part(s) of {} rows, offset {})",
            name,
            stage,
            plain_leads.len(),
            lead_len,
            offset % lead_len
        );

        Ok(Method {
            name,
            stage,
            place_notation,
            plain_leads,
            lead_len,
            offset: offset % lead_len,
            calling_position: lead_len,
            calls: BTreeMap::new(),
            call_notation: BTreeMap::new(),
        })
    }

    /// Builder-style version of [`Method::set_calls`].
    pub fn with_calls(
        mut self,
        calling_position: isize,
        bob: &str,
        single: &str,
    ) -> crate::Result<Self> {
        self.set_calls(calling_position, bob, single)?;
        Ok(self)
    }

    /// Replaces the calls of this `Method`.  `calling_position` is the (1-indexed) row of the lead
    /// where calls start, and is reduced into `1..=lead_len` (so `0` and `lead_len` both mean the
    /// lead end).  `bob` and `single` are place notation, optionally with one `|`-separated
    /// variant per lead part.  Empty notation means that call isn't defined.
    ///
    /// If there are fewer variants than lead parts, the last variant is repeated.  If this fails,
    /// `self` is left unchanged.
    ///
    /// # Example
    /// ```
    /// use touchframe::{CallType, Method, Stage};
    ///
    /// let mut plain_bob = Method::new("Plain Bob", Stage::DOUBLES, "&5.1.5.1.5,125")?;
    /// plain_bob.set_calls(0, "145", "123")?;
    /// assert_eq!(plain_bob.calling_position(), 10);
    /// assert_eq!(plain_bob.call_notation(CallType::Single), "123");
    /// plain_bob.set_calls(-3, "145", "")?;
    /// assert_eq!(plain_bob.calling_position(), 7);
    /// assert!(plain_bob.call_blocks(CallType::Single).is_empty());
    /// # Ok::<(), touchframe::Error>(())
    /// ```
    pub fn set_calls(
        &mut self,
        calling_position: isize,
        bob: &str,
        single: &str,
    ) -> crate::Result<()> {
        let lead_len = isize::try_from(self.lead_len)
            .ok()
            .filter(|&len| len > 0)
            .ok_or(TouchError::CallingPositionOutOfRange {
                calling_position,
                lead_len: self.lead_len,
            })?;
        let calling_position = match calling_position.rem_euclid(lead_len) {
            0 => self.lead_len,
            cp => cp as usize,
        };
        // The row of each call block that lands on the lead end
        let lead_end_row = self.lead_len - calling_position + 1;

        let mut calls = BTreeMap::new();
        let mut call_notation = BTreeMap::new();
        for (call_type, notation) in [(CallType::Bob, bob), (CallType::Single, single)] {
            let notation = strip_whitespace(notation).to_ascii_uppercase();
            if notation.is_empty() {
                continue;
            }
            let mut variants = Vec::new();
            for part in notation.split('|') {
                let mut variant = Block::from_place_notation(part, self.stage)?;
                if let Some(row) = variant.row_mut(lead_end_row) {
                    row.set_lead_end(true);
                }
                variants.push(variant);
            }
            if variants.len() > self.num_lead_parts() {
                log::warn!(
                    "{} has {} {} variants but only {} lead parts; the extras won't be rung",
                    self.title(),
                    variants.len(),
                    call_type,
                    self.num_lead_parts()
                );
            }
            while variants.len() < self.num_lead_parts() {
                let last = variants[variants.len() - 1].clone();
                variants.push(last);
            }
            calls.insert(call_type, variants);
            call_notation.insert(call_type, notation);
        }

        log::debug!(
            "Set calls of {} at row {}: {:?}",
            self.title(),
            calling_position,
            call_notation
        );
        self.calling_position = calling_position;
        self.calls = calls;
        self.call_notation = call_notation;
        Ok(())
    }

    /////////////
    // GETTERS //
    /////////////

    /// The name of this `Method`, without its [`Stage`] (e.g. `"Plain Bob"`)
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name of this `Method`, followed by its [`Stage`] (e.g. `"Plain Bob Doubles"`)
    pub fn title(&self) -> String {
        format!("{} {}", self.name, self.stage)
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The place notation of this `Method`, in upper case with whitespace removed.
    #[inline]
    pub fn place_notation(&self) -> &str {
        &self.place_notation
    }

    /// The number of rows in the first lead part.
    #[inline]
    pub fn lead_len(&self) -> usize {
        self.lead_len
    }

    #[inline]
    pub fn num_lead_parts(&self) -> usize {
        self.plain_leads.len()
    }

    /// How many rows into the first lead part each lead starts
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The row of each lead (between `1` and [`lead_len`](Self::lead_len) inclusive) where calls
    /// take effect.  Before any calls are set, this is the lead end.
    #[inline]
    pub fn calling_position(&self) -> usize {
        self.calling_position
    }

    /// The changes of a given lead part, if it exists.
    pub fn plain_lead(&self, part: usize) -> Option<&Block> {
        self.plain_leads.get(part)
    }

    /// The changes of a given [`CallType`], one [`Block`] per lead part.  Empty if that call isn't
    /// defined.
    pub fn call_blocks(&self, call_type: CallType) -> &[Block] {
        self.calls.get(&call_type).map_or(&[], Vec::as_slice)
    }

    /// The normalised notation of a given [`CallType`], or `""` if it isn't defined.
    pub fn call_notation(&self, call_type: CallType) -> &str {
        self.call_notation.get(&call_type).map_or("", String::as_str)
    }

    /// The variant of `call_type` for a given lead part
    pub(crate) fn call_block(&self, call_type: CallType, part: usize) -> Option<&Block> {
        self.calls.get(&call_type).and_then(|variants| variants.get(part))
    }

    /////////////
    // RINGING //
    /////////////

    /// Rings one plain lead (i.e. every lead part) onto the end of `block`.  If this `Method` has
    /// an offset, the lead starts part-way through the first lead part and the last row of `block`
    /// stops being a lead end.
    pub fn ring_plain_lead(&self, block: &mut Block) -> Result<(), SizeMismatchError> {
        SizeMismatchError::test_covers(block.stage(), self.stage)?;
        self.start_plain_lead(block);
        for change in self.plain_lead_changes() {
            block.ring(change)?;
        }
        Ok(())
    }

    /// Unmarks the lead end which an offset lead starts part-way past
    fn start_plain_lead(&self, block: &mut Block) {
        if self.offset != 0 {
            block.last_row_mut().set_lead_end(false);
        }
    }

    /// The changes of one plain lead, starting `offset` rows into the first lead part
    fn plain_lead_changes(&self) -> impl Iterator<Item = &Row> + '_ {
        let first_part = self.plain_leads[0].changes();
        first_part[self.offset..]
            .iter()
            .chain(self.plain_leads[1..].iter().flat_map(Block::changes))
            .chain(&first_part[..self.offset])
    }

    /// Rings `num_leads` plain leads onto the end of `block`.
    pub fn ring_plain_leads(
        &self,
        block: &mut Block,
        num_leads: usize,
    ) -> Result<(), SizeMismatchError> {
        for _ in 0..num_leads {
            self.ring_plain_lead(block)?;
        }
        Ok(())
    }

    /// Rings plain leads onto `block` until its last row returns to where it started, using
    /// [`Config::default`].
    pub fn ring_plain_course(&self, block: &mut Block) -> crate::Result<()> {
        self.ring_plain_course_with(block, &Config::default())
    }

    /// Rings plain leads onto `block` until its last row returns to where it started.  Fails with
    /// [`NonTerminatingMethodError`] as soon as the course would need more than
    /// [`Config::max_rows`] rows, in which case exactly that many rows have been rung.
    ///
    /// # Example
    /// ```
    /// use touchframe::{Block, Method, Stage};
    ///
    /// let plain_bob = Method::new("Plain Bob", Stage::DOUBLES, "&5.1.5.1.5,125")?;
    /// let mut block = Block::new(Stage::DOUBLES);
    /// plain_bob.ring_plain_course(&mut block)?;
    /// assert_eq!(block.len(), 40);
    /// assert!(block.came_round());
    /// # Ok::<(), touchframe::Error>(())
    /// ```
    pub fn ring_plain_course_with(&self, block: &mut Block, config: &Config) -> crate::Result<()> {
        SizeMismatchError::test_covers(block.stage(), self.stage)?;
        let start = block.last_row().clone();
        let start_len = block.len();
        loop {
            self.start_plain_lead(block);
            for change in self.plain_lead_changes() {
                if block.len() - start_len >= config.max_rows {
                    return Err(NonTerminatingMethodError {
                        max_rows: config.max_rows,
                    }
                    .into());
                }
                block.ring(change)?;
            }
            if *block.last_row() == start {
                return Ok(());
            }
        }
    }

    /// Rings a touch (e.g. `"PPBPPS"`) using [`Config::default`].
    pub fn ring_touch(&self, block: &mut Block, calls: &str) -> crate::Result<()> {
        self.ring_touch_with(block, calls, &Config::default())
    }

    /// Rings a touch onto the end of `block`.  Each `P`, `B` or `S` in `calls` is one lead, which
    /// is plain or has a bob or single made at the [calling position](Self::calling_position).
    ///
    /// If `calls` contains an invalid [`char`] (and [`Config::strict_calls`] is set), then the
    /// leads before that [`char`] are rung as a complete touch before the error is returned.
    ///
    /// # Example
    /// ```
    /// use touchframe::{Block, Method, Stage};
    ///
    /// let plain_bob = Method::new("Plain Bob", Stage::DOUBLES, "&5.1.5.1.5,125")?
    ///     .with_calls(0, "145", "123")?;
    /// let mut block = Block::new(Stage::DOUBLES);
    /// plain_bob.ring_touch(&mut block, "PB")?;
    /// assert_eq!(block.len(), 20);
    /// assert_eq!(block.last_row().to_string(), "13542");
    /// # Ok::<(), touchframe::Error>(())
    /// ```
    pub fn ring_touch_with(
        &self,
        block: &mut Block,
        calls: &str,
        config: &Config,
    ) -> crate::Result<()> {
        SizeMismatchError::test_covers(block.stage(), self.stage)?;
        match parse_touch(calls, config.strict_calls) {
            Ok(leads) => TouchState::new(self, leads).ring(block),
            Err(e @ TouchError::InvalidCallChar { index, .. }) => {
                let leads = parse_touch(&calls[..index], true)?;
                log::debug!("Ringing {} lead(s) before the invalid call", leads.len());
                TouchState::new(self, leads).ring(block)?;
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Parses the `n` in a `<n` suffix
fn parse_offset(s: &str) -> Result<usize, NotationError> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(NotationError::InvalidOffset(s.to_owned()));
    }
    s.parse()
        .map_err(|_| NotationError::InvalidOffset(s.to_owned()))
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::{row::CallMarker, Error, Row};

    const PB_DOUBLES: &str = "&5.1.5.1.5,125";

    fn plain_bob() -> Method {
        Method::new("Plain Bob", Stage::DOUBLES, PB_DOUBLES)
            .unwrap()
            .with_calls(0, "145", "123")
            .unwrap()
    }

    fn bells(block: &Block) -> Vec<String> {
        block.changes().iter().map(Row::to_string).collect_vec()
    }

    #[test]
    fn construction() {
        let m = Method::new("Plain Bob", Stage::DOUBLES, " &5.1.5.1.5, 125 ").unwrap();
        assert_eq!(m.name(), "Plain Bob");
        assert_eq!(m.title(), "Plain Bob Doubles");
        assert_eq!(m.to_string(), "Plain Bob Doubles");
        assert_eq!(m.place_notation(), "&5.1.5.1.5,125");
        assert_eq!(m.lead_len(), 10);
        assert_eq!(m.num_lead_parts(), 1);
        assert_eq!(m.offset(), 0);
        assert_eq!(m.calling_position(), 10);
        assert!(m.call_blocks(CallType::Bob).is_empty());
        assert_eq!(m.call_notation(CallType::Bob), "");

        let lead = m.plain_lead(0).unwrap();
        assert!(lead.last_row().is_lead_end());
        assert_eq!(lead.changes().iter().filter(|r| r.is_lead_end()).count(), 1);
        assert!(m.plain_lead(1).is_none());
    }

    #[test]
    fn offsets() {
        #[track_caller]
        fn check(pn: &str, exp_offset: usize) {
            assert_eq!(Method::new("", Stage::DOUBLES, pn).unwrap().offset(), exp_offset);
        }

        check("3.1.3.1.3|1.3.1.3.1<3", 3);
        check("3.1.3.1.3|1.3.1.3.1<5", 0);
        check("3.1.3.1.3|1.3.1.3.1<13", 3);
        check("&5.1.5.1.5,125<0", 0);
    }

    #[test]
    fn construction_errors() {
        #[track_caller]
        fn check(pn: &str, exp_err: NotationError) {
            assert_eq!(
                Method::new("", Stage::DOUBLES, pn).unwrap_err(),
                exp_err
            );
        }

        check("", NotationError::Empty);
        check("3.1.3|", NotationError::Empty);
        check("3.1.3<", NotationError::InvalidOffset(String::new()));
        check("3.1.3<X", NotationError::InvalidOffset("X".to_owned()));
        check("3.1.3<-2", NotationError::InvalidOffset("-2".to_owned()));
        check(
            "&5.1.5.1.7,125",
            NotationError::PlaceOutOfStage {
                token: "7".to_owned(),
                place: crate::Bell::from_name('7').unwrap(),
                stage: Stage::DOUBLES,
            },
        );
    }

    #[test]
    fn calls() {
        let m = plain_bob();
        assert_eq!(m.calling_position(), 10);
        assert_eq!(m.call_notation(CallType::Bob), "145");
        assert_eq!(m.call_notation(CallType::Single), "123");
        let bob = &m.call_blocks(CallType::Bob)[0];
        assert_eq!(bob.len(), 1);
        // The only row of the bob lands on the lead end
        assert!(bob.last_row().is_lead_end());
    }

    #[test]
    fn set_calls_is_atomic() {
        let mut m = plain_bob();
        assert!(m.set_calls(3, "145", "1234567").is_err());
        assert_eq!(m.calling_position(), 10);
        assert_eq!(m.call_notation(CallType::Single), "123");
        assert_eq!(m.call_blocks(CallType::Single).len(), 1);
    }

    #[test]
    fn call_variants_are_padded() {
        let m = Method::new("", Stage::DOUBLES, "3.1.3.1.3|1.3.1.3.1")
            .unwrap()
            .with_calls(2, "5", "")
            .unwrap();
        let bobs = m.call_blocks(CallType::Bob);
        assert_eq!(bobs.len(), 2);
        assert_eq!(bobs[0].changes(), bobs[1].changes());
        // The bob's 4th row would land on the lead end, but it only has one row
        assert!(bobs.iter().all(|b| !b.last_row().is_lead_end()));

        let m = m.with_calls(2, "5 | 3.5.1.3", "").unwrap();
        let bobs = m.call_blocks(CallType::Bob);
        assert_eq!(bobs[0].len(), 1);
        assert_eq!(bobs[1].len(), 4);
        assert!(bobs[1].last_row().is_lead_end());
    }

    #[quickcheck]
    fn calling_position_is_reduced(calling_position: isize) -> bool {
        let m = plain_bob().with_calls(calling_position, "145", "").unwrap();
        let cp = m.calling_position();
        let lead_len = m.lead_len() as i128;
        (1..=m.lead_len()).contains(&cp)
            && (cp as i128 - calling_position as i128).rem_euclid(lead_len) == 0
    }

    #[test]
    fn plain_lead_and_course() {
        let m = plain_bob();
        let mut block = Block::new(Stage::DOUBLES);
        m.ring_plain_lead(&mut block).unwrap();
        assert_eq!(block.len(), 10);
        assert_eq!(block.last_row().to_string(), "13524");
        assert!(block.last_row().is_lead_end());

        let mut block = Block::new(Stage::DOUBLES);
        m.ring_plain_course(&mut block).unwrap();
        assert_eq!(block.len(), 40);
        assert!(block.came_round());
        let lead_heads = block
            .changes()
            .iter()
            .filter(|r| r.is_lead_end())
            .map(Row::to_string)
            .collect_vec();
        assert_eq!(lead_heads, ["13524", "15432", "14253", "12345"]);
    }

    #[test]
    fn plain_course_from_any_row() {
        let m = plain_bob();
        let mut block = Block::new(Stage::DOUBLES);
        m.ring_plain_lead(&mut block).unwrap();
        m.ring_plain_course(&mut block).unwrap();
        assert_eq!(block.len(), 50);
        assert_eq!(block.last_row().to_string(), "13524");
    }

    #[test]
    fn plain_course_ceiling() {
        let m = plain_bob();
        let mut block = Block::new(Stage::DOUBLES);
        let config = Config {
            max_rows: 25,
            ..Config::default()
        };
        assert_eq!(
            m.ring_plain_course_with(&mut block, &config),
            Err(Error::NonTerminating(NonTerminatingMethodError { max_rows: 25 }))
        );
        // Stops mid-lead rather than finishing the lead it was on
        assert_eq!(block.len(), 25);
        assert!(!block.last_row().is_lead_end());
    }

    #[test]
    fn too_big_for_block() {
        let m = Method::new("Plain Bob", Stage::MINOR, "&x16x16x16,12").unwrap();
        let mut block = Block::new(Stage::DOUBLES);
        let exp_err = SizeMismatchError {
            lhs_stage: Stage::DOUBLES,
            rhs_stage: Stage::MINOR,
        };
        assert_eq!(m.ring_plain_lead(&mut block), Err(exp_err));
        assert_eq!(m.ring_plain_course(&mut block), Err(Error::SizeMismatch(exp_err)));
        assert_eq!(m.ring_touch(&mut block, "P"), Err(Error::SizeMismatch(exp_err)));
        assert!(block.is_empty());
    }

    #[test]
    fn bob_and_single() {
        #[track_caller]
        fn check(touch: &str, exp_last_row: &str) {
            let mut block = Block::new(Stage::DOUBLES);
            plain_bob().ring_touch(&mut block, touch).unwrap();
            assert_eq!(block.last_row().to_string(), exp_last_row);
        }

        check("B", "12354");
        check("S", "13245");
        check("PB", "13542");
        check("BB", "12345");
        check("SS", "12345");
        check("PPPP", "12345");
    }

    #[test]
    fn call_markers() {
        let mut block = Block::new(Stage::DOUBLES);
        plain_bob().ring_touch(&mut block, "BS").unwrap();
        let markers = block
            .changes()
            .iter()
            .positions(|r| r.call().is_some())
            .collect_vec();
        assert_eq!(markers, [9, 19]);
        assert_eq!(block.row(10).unwrap().call(), Some(CallMarker::Call(CallType::Bob)));
        assert_eq!(block.row(20).unwrap().call(), Some(CallMarker::Call(CallType::Single)));
        assert_eq!(block.row(10).unwrap().place_not(), "145");
        assert!(block.row(10).unwrap().is_lead_end());
        assert!(block.row(20).unwrap().is_lead_end());
    }

    #[test]
    fn touch_length_is_per_lead() {
        let m = plain_bob();
        let mut block = Block::new(Stage::DOUBLES);
        m.ring_touch(&mut block, "PPPB").unwrap();
        assert_eq!(block.len(), 4 * m.lead_len());
    }

    #[test]
    fn call_before_lead_end() {
        // A two-row bob starting at the 9th row gives the same rows as the usual bob
        let m = Method::new("Plain Bob", Stage::DOUBLES, PB_DOUBLES)
            .unwrap()
            .with_calls(9, "5.145", "")
            .unwrap();
        let mut long_bob = Block::new(Stage::DOUBLES);
        m.ring_touch(&mut long_bob, "BP").unwrap();
        let mut short_bob = Block::new(Stage::DOUBLES);
        plain_bob().ring_touch(&mut short_bob, "BP").unwrap();

        assert_eq!(bells(&long_bob), bells(&short_bob));
        assert_eq!(long_bob.row(9).unwrap().call(), Some(CallMarker::Call(CallType::Bob)));
        assert_eq!(long_bob.row(10).unwrap().call(), None);
        assert!(long_bob.row(10).unwrap().is_lead_end());
    }

    #[test]
    fn call_runs_into_next_lead() {
        let m = Method::new("Plain Bob", Stage::DOUBLES, PB_DOUBLES)
            .unwrap()
            .with_calls(0, "145.3", "")
            .unwrap();
        let mut block = Block::new(Stage::DOUBLES);
        m.ring_touch(&mut block, "BP").unwrap();
        assert_eq!(block.len(), 20);
        assert_eq!(block.row(10).unwrap().to_string(), "12354");
        assert_eq!(block.row(11).unwrap().place_not(), "3");
        assert_eq!(block.row(11).unwrap().call(), None);
        assert_eq!(block.row(12).unwrap().place_not(), "1");
    }

    #[test]
    fn missing_call_is_rung_plain() {
        let m = Method::new("Plain Bob", Stage::DOUBLES, PB_DOUBLES)
            .unwrap()
            .with_calls(0, "145", "")
            .unwrap();
        let mut touch = Block::new(Stage::DOUBLES);
        m.ring_touch(&mut touch, "S").unwrap();
        let mut plain = Block::new(Stage::DOUBLES);
        m.ring_plain_lead(&mut plain).unwrap();
        assert_eq!(bells(&touch), bells(&plain));
        assert!(touch.changes().iter().all(|r| r.call().is_none()));
    }

    #[test]
    fn invalid_call_rings_prefix() {
        let m = plain_bob();
        let mut block = Block::new(Stage::DOUBLES);
        assert_eq!(
            m.ring_touch(&mut block, "PBXP"),
            Err(Error::Touch(TouchError::InvalidCallChar { index: 2, c: 'X' }))
        );
        let mut prefix = Block::new(Stage::DOUBLES);
        m.ring_touch(&mut prefix, "PB").unwrap();
        assert_eq!(bells(&block), bells(&prefix));

        // ... unless strictness is turned off
        let lenient = Config {
            strict_calls: false,
            ..Config::default()
        };
        let mut block = Block::new(Stage::DOUBLES);
        m.ring_touch_with(&mut block, "PBXP", &lenient).unwrap();
        assert_eq!(block.len(), 30);
    }

    #[test]
    fn empty_touch() {
        let mut block = Block::new(Stage::DOUBLES);
        plain_bob().ring_touch(&mut block, "  ").unwrap();
        assert!(block.is_empty());
    }
}
