//! A representation of a [`Block`] of ringing; i.e. a growing sequence of [`Row`]s which starts
//! from rounds.

use std::fmt::{Display, Formatter};

use crate::{
    config::NonTerminatingMethodError,
    place_not::{plain_hunt_notation, NotationError},
    row::CallMarker,
    Bell, Config, PnBlock, Row, SizeMismatchError, Stage,
};

/// An append-only sequence of [`Row`]s, all of the same [`Stage`].
///
/// Every `Block` starts with a 'sentinel' row of rounds which is marked as a lead end.  This row
/// is never counted in the `Block`'s [`len`](Self::len), but it is where all the ringing starts
/// from and it can be annotated like any other row.
///
/// `Block`s are used in two ways:
/// - Blocks made by [`Block::expand_place_notation`] contain one **change** per place notation
///   token.  Each row is that token's transposition, applied to rounds.
/// - Blocks which have had changes [`ring`](Self::ring)ed onto them contain the accumulated
///   **rows** of some ringing (e.g. a plain course or a touch).
#[derive(Debug, Clone)]
pub struct Block {
    /// **Invariant**: `rows` is never empty, `rows[0]` is rounds, and every row has the same
    /// [`Stage`].
    rows: Vec<Row>,
    /// The number of rows in each lead, or `0` if this hasn't been decided.  This is only used to
    /// mark lead ends when ringing call changes.
    lead_len: usize,
    /// How many rows have been added since this `Block` was created (or the count was reset).
    rows_rung: u64,
}

impl Block {
    //////////////////
    // CONSTRUCTORS //
    //////////////////

    /// Creates a `Block` containing just the sentinel row of rounds on a given [`Stage`].
    pub fn new(stage: Stage) -> Self {
        Self::with_lead_len(stage, 0)
    }

    /// Creates an empty `Block` (like [`Block::new`]), which expects leads of `lead_len` rows.
    pub fn with_lead_len(stage: Stage, lead_len: usize) -> Self {
        let mut sentinel = Row::rounds(stage);
        sentinel.set_lead_end(true);
        Block {
            rows: vec![sentinel],
            lead_len,
            rows_rung: 0,
        }
    }

    /// Creates a `Block` containing the changes of some place notation.  Shorthand for
    /// [`Block::new`] followed by [`Block::expand_place_notation`].
    ///
    /// # Example
    /// ```
    /// use touchframe::{Block, Stage};
    ///
    /// let lead = Block::from_place_notation("&5.1.5.1.5,125", Stage::DOUBLES)?;
    /// assert_eq!(lead.len(), 10);
    /// assert_eq!(lead.row(1).unwrap().to_string(), "21435");
    /// assert_eq!(lead.last_row().to_string(), "12435");
    /// # Ok::<(), touchframe::place_not::NotationError>(())
    /// ```
    pub fn from_place_notation(pn: &str, stage: Stage) -> Result<Self, NotationError> {
        let mut block = Block::new(stage);
        block.expand_place_notation(pn)?;
        Ok(block)
    }

    /////////////
    // GETTERS //
    /////////////

    /// The [`Stage`] of every [`Row`] in this `Block`.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.rows[0].stage()
    }

    /// The number of [`Row`]s in this `Block`, not counting the sentinel.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len() - 1
    }

    /// Shorthand for `self.len() == 0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn lead_len(&self) -> usize {
        self.lead_len
    }

    #[inline]
    pub fn set_lead_len(&mut self, lead_len: usize) {
        self.lead_len = lead_len;
    }

    /// How many [`Row`]s have been added to this `Block` since it was created, cleared or had
    /// [`reset_rows_rung`](Self::reset_rows_rung) called.
    #[inline]
    pub fn rows_rung(&self) -> u64 {
        self.rows_rung
    }

    #[inline]
    pub fn reset_rows_rung(&mut self) {
        self.rows_rung = 0;
    }

    /// All the [`Row`]s in this `Block`, **including** the sentinel.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// All the [`Row`]s in this `Block`, **excluding** the sentinel.
    #[inline]
    pub fn changes(&self) -> &[Row] {
        &self.rows[1..]
    }

    /// Gets the [`Row`] at a given index.  Index `0` is the sentinel.
    #[inline]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// The sentinel row of rounds that this `Block` starts from.
    #[inline]
    pub fn first_row(&self) -> &Row {
        &self.rows[0]
    }

    /// The most recently added [`Row`] (or the sentinel if this `Block` is empty).
    #[inline]
    pub fn last_row(&self) -> &Row {
        // `rows` is never empty
        &self.rows[self.rows.len() - 1]
    }

    /// Returns `true` if the last row of this `Block` equals its first row.  An empty `Block` has
    /// always come round.
    pub fn came_round(&self) -> bool {
        self.last_row() == self.first_row()
    }

    pub(crate) fn last_row_mut(&mut self) -> &mut Row {
        let last_idx = self.rows.len() - 1;
        &mut self.rows[last_idx]
    }

    pub(crate) fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    /////////////
    // RINGING //
    /////////////

    /// Appends a copy of `row` to this `Block`, which must have the same [`Stage`].
    pub fn append_row(&mut self, row: &Row) -> Result<(), SizeMismatchError> {
        SizeMismatchError::test_eq(self.stage(), row.stage())?;
        self.push(row.clone());
        Ok(())
    }

    /// Ring one change onto the end of this `Block`, i.e. append `self.last_row() * transposition`.
    /// The `transposition` can have fewer bells than this `Block`, in which case the extra bells
    /// cover.  Returns the new [`Row`].
    pub fn ring(&mut self, transposition: &Row) -> Result<&Row, SizeMismatchError> {
        let next = self.last_row().compose(transposition)?;
        self.push(next);
        Ok(self.last_row())
    }

    /// Ring every change of another `Block` (i.e. everything except its sentinel) onto the end of
    /// this one.  If `lead` has too many bells, nothing is rung.
    ///
    /// # Example
    /// ```
    /// use touchframe::{Block, Stage};
    ///
    /// let lead = Block::from_place_notation("&5.1.5.1.5,125", Stage::DOUBLES)?;
    /// let mut touch = Block::new(Stage::MINOR); // The 6 covers
    /// touch.ring_lead(&lead)?;
    /// assert_eq!(touch.len(), 10);
    /// assert_eq!(touch.last_row().to_string(), "135246");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn ring_lead(&mut self, lead: &Block) -> Result<(), SizeMismatchError> {
        SizeMismatchError::test_covers(self.stage(), lead.stage())?;
        for change in lead.changes() {
            self.ring(change)?;
        }
        Ok(())
    }

    /// Parse some place notation on this `Block`'s [`Stage`], and append one change per token.
    /// If the notation is invalid then nothing is appended.
    pub fn expand_place_notation(&mut self, pn: &str) -> Result<(), NotationError> {
        let pn_block = PnBlock::parse(pn, self.stage())?;
        for transposition in pn_block.transpositions() {
            self.push(transposition);
        }
        Ok(())
    }

    /// Ring one call change: `bell` moves to follow `follow` (or to lead if `follow` is `None`).
    /// The new [`Row`] is marked with the called bell, and is a lead end if it completes a lead.
    ///
    /// # Example
    /// ```
    /// use touchframe::{Bell, Block, Stage};
    ///
    /// let mut block = Block::new(Stage::MINOR);
    /// block.call_change(Bell::from_name('5').unwrap(), Some(Bell::from_name('2').unwrap()))?;
    /// assert_eq!(block.last_row().to_string(), "125346");
    /// assert_eq!(block.last_row().place_not(), "5>2");
    /// # Ok::<(), touchframe::place_not::NotationError>(())
    /// ```
    pub fn call_change(&mut self, bell: Bell, follow: Option<Bell>) -> Result<&Row, NotationError> {
        let mut next = self.last_row().clone();
        next.call_change(bell, follow)?;
        next.set_call(Some(CallMarker::CallChange(bell)));
        next.set_place_not(match follow {
            Some(follow) => format!("{}>{}", bell, follow),
            None => format!("{}>.", bell),
        });
        next.set_annotation("");
        let new_len = self.len() + 1;
        next.set_lead_end(self.lead_len != 0 && new_len % self.lead_len == 0);
        self.push(next);
        Ok(self.last_row())
    }

    /// Ring one plain course of plain hunt on `stage` bells.  If `stage` is smaller than this
    /// `Block`'s [`Stage`], the extra bells cover.
    pub fn ring_plain_hunt(&mut self, stage: Stage) -> crate::Result<()> {
        if stage.num_bells() < 2 {
            return Err(NotationError::HuntStageTooSmall(stage).into());
        }
        SizeMismatchError::test_covers(self.stage(), stage)?;
        let lead = Block::from_place_notation(&plain_hunt_notation(stage), stage)?;
        self.ring_lead(&lead)?;
        Ok(())
    }

    /// Treat the existing rows of this `Block` as changes from the sentinel and keep ringing them
    /// until the `Block` comes round.  Fails as soon as the `Block` would grow past
    /// [`Config::max_rows`] rows, leaving exactly that many rows in it.
    ///
    /// # Example
    /// ```
    /// use touchframe::{Block, Config, Stage};
    ///
    /// let mut block = Block::new(Stage::DOUBLES);
    /// block.ring_lead(&Block::from_place_notation("&5.1.5.1.5,125", Stage::DOUBLES)?)?;
    /// block.repeat(&Config::default())?;
    /// assert_eq!(block.len(), 40);
    /// assert!(block.came_round());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn repeat(&mut self, config: &Config) -> crate::Result<()> {
        let changes = self.changes().to_vec();
        while !self.came_round() {
            let lead_head = self.last_row().clone();
            for change in &changes {
                if self.len() >= config.max_rows {
                    return Err(NonTerminatingMethodError {
                        max_rows: config.max_rows,
                    }
                    .into());
                }
                self.push(lead_head.compose(change)?);
            }
        }
        Ok(())
    }

    /// Removes every row except the sentinel, and resets [`rows_rung`](Self::rows_rung).
    pub fn clear(&mut self) {
        self.rows.truncate(1);
        self.rows_rung = 0;
    }

    fn push(&mut self, row: Row) {
        self.rows.push(row);
        self.rows_rung += 1;
    }

    /////////////////
    // ANNOTATIONS //
    /////////////////

    /// Sets the annotation of the [`Row`] at `index`, returning `false` if there is no such row.
    pub fn set_annotation(&mut self, index: usize, annotation: impl Into<String>) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.set_annotation(annotation);
                true
            }
            None => false,
        }
    }

    /// Removes the annotation of the [`Row`] at `index`, returning `false` if there is no such
    /// row.
    pub fn clear_annotation(&mut self, index: usize) -> bool {
        self.set_annotation(index, String::new())
    }

    /// An [`Iterator`] over the index and text of every non-empty annotation, in row order.
    pub fn annotations(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.annotation().is_empty())
            .map(|(idx, row)| (idx, row.annotation()))
    }
}

impl Display for Block {
    /// Writes one line per [`Row`] (including the sentinel), each prefixed with its index.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (idx, row) in self.rows.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{:5} {}", idx, row.full())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::Error;

    const PLAIN_BOB_DOUBLES: &str = "&5.1.5.1.5,125";

    fn row(s: &str) -> Row {
        Row::parse(s).unwrap()
    }

    fn bell(c: char) -> Bell {
        Bell::from_name(c).unwrap()
    }

    fn plain_bob_lead() -> Block {
        Block::from_place_notation(PLAIN_BOB_DOUBLES, Stage::DOUBLES).unwrap()
    }

    fn row_strings(block: &Block) -> Vec<String> {
        block.changes().iter().map(Row::to_string).collect_vec()
    }

    #[test]
    fn empty() {
        let block = Block::new(Stage::MINOR);
        assert!(block.is_empty());
        assert_eq!(block.len(), 0);
        assert_eq!(block.stage(), Stage::MINOR);
        assert!(block.first_row().is_rounds());
        assert!(block.first_row().is_lead_end());
        assert!(block.came_round());
        assert_eq!(block.rows_rung(), 0);
    }

    #[test]
    fn expand_holds_changes() {
        let lead = plain_bob_lead();
        assert_eq!(lead.len(), 10);
        assert_eq!(
            lead.changes().iter().map(Row::place_not).join("."),
            "5.1.5.1.5.1.5.1.5.125"
        );
        assert_eq!(lead.row(2), Some(&row("13254")));
        assert!(lead.changes().iter().all(|r| !r.is_lead_end()));
    }

    #[test]
    fn expand_is_atomic() {
        let mut block = plain_bob_lead();
        assert!(block.expand_place_notation("&5.1.5.18").is_err());
        assert!(block.expand_place_notation("5.1,,5").is_err());
        assert_eq!(block.len(), 10);
    }

    #[test]
    fn ring_plain_bob() {
        let mut block = Block::new(Stage::DOUBLES);
        block.ring_lead(&plain_bob_lead()).unwrap();
        assert_eq!(
            row_strings(&block),
            [
                "21435", "24153", "42513", "45231", "54321", "53412", "35142", "31524", "13254",
                "13524"
            ]
        );
        assert_eq!(block.last_row().place_not(), "125");
        assert_eq!(block.rows_rung(), 10);
        assert!(!block.came_round());
    }

    #[test]
    fn ring_lead_too_big() {
        let mut block = Block::new(Stage::DOUBLES);
        let minor_lead = Block::from_place_notation("x1", Stage::MINOR).unwrap();
        assert_eq!(
            block.ring_lead(&minor_lead),
            Err(SizeMismatchError {
                lhs_stage: Stage::DOUBLES,
                rhs_stage: Stage::MINOR
            })
        );
        assert!(block.is_empty());
    }

    #[test]
    fn append_row() {
        let mut block = Block::new(Stage::MINIMUS);
        block.append_row(&row("2143")).unwrap();
        assert_eq!(block.last_row(), &row("2143"));
        assert!(block.append_row(&row("21435")).is_err());
        assert_eq!(block.len(), 1);
    }

    #[test]
    fn repeat() {
        let mut block = Block::new(Stage::DOUBLES);
        block.ring_lead(&plain_bob_lead()).unwrap();
        block.repeat(&Config::default()).unwrap();
        assert_eq!(block.len(), 40);
        assert!(block.came_round());
        assert_eq!(block.row(20), Some(&row("15432")));
        assert_eq!(block.row(30), Some(&row("14253")));
        // Each repeat carries the metadata of the change it came from
        assert_eq!(block.row(30).unwrap().place_not(), "125");
    }

    #[test]
    fn repeat_ceiling() {
        let mut block = Block::new(Stage::DOUBLES);
        block.ring_lead(&plain_bob_lead()).unwrap();
        let config = Config {
            max_rows: 20,
            ..Config::default()
        };
        assert_eq!(
            block.repeat(&config),
            Err(Error::NonTerminating(NonTerminatingMethodError {
                max_rows: 20
            }))
        );
        assert_eq!(block.len(), 20);
        // A ceiling part-way through a lead is never overshot
        let mut block = Block::new(Stage::DOUBLES);
        block.ring_lead(&plain_bob_lead()).unwrap();
        let config = Config {
            max_rows: 15,
            ..Config::default()
        };
        assert!(block.repeat(&config).is_err());
        assert_eq!(block.len(), 15);
        assert_eq!(block.last_row().to_string(), "42531");
        // Exactly enough rows is fine
        let mut block = Block::new(Stage::DOUBLES);
        block.ring_lead(&plain_bob_lead()).unwrap();
        let config = Config {
            max_rows: 40,
            ..Config::default()
        };
        assert!(block.repeat(&config).is_ok());
    }

    #[test]
    fn plain_hunt() {
        #[track_caller]
        fn check(block_stage: Stage, hunt_stage: Stage) {
            let mut block = Block::new(block_stage);
            block.ring_plain_hunt(hunt_stage).unwrap();
            assert_eq!(block.len(), hunt_stage.num_bells() * 2);
            assert!(block.came_round());
            // Nothing comes round early
            assert!(block.changes()[..block.len() - 1]
                .iter()
                .all(|r| !r.is_rounds()));
        }

        check(Stage::DOUBLES, Stage::DOUBLES);
        check(Stage::MINOR, Stage::MINOR);
        check(Stage::MINOR, Stage::DOUBLES);
        check(Stage::MAJOR, Stage::TRIPLES);
        check(Stage::MAXIMUS, Stage::MAXIMUS);
    }

    #[test]
    fn plain_hunt_errors() {
        let mut block = Block::new(Stage::DOUBLES);
        assert_eq!(
            block.ring_plain_hunt(Stage::ONE),
            Err(Error::Notation(NotationError::HuntStageTooSmall(Stage::ONE)))
        );
        assert_eq!(
            block.ring_plain_hunt(Stage::MINOR),
            Err(Error::SizeMismatch(SizeMismatchError {
                lhs_stage: Stage::DOUBLES,
                rhs_stage: Stage::MINOR
            }))
        );
        assert!(block.is_empty());
    }

    #[test]
    fn call_changes() {
        let mut block = Block::with_lead_len(Stage::MINOR, 2);
        block.call_change(bell('5'), Some(bell('2'))).unwrap();
        assert_eq!(block.last_row(), &row("125346"));
        assert_eq!(
            block.last_row().call(),
            Some(CallMarker::CallChange(bell('5')))
        );
        assert!(!block.last_row().is_lead_end());

        block.call_change(bell('3'), None).unwrap();
        assert_eq!(block.last_row(), &row("312546"));
        assert_eq!(block.last_row().place_not(), "3>.");
        assert!(block.last_row().is_lead_end());

        assert!(block.call_change(bell('7'), None).is_err());
        assert_eq!(block.len(), 2);
    }

    #[test]
    fn annotations() {
        let mut block = plain_bob_lead();
        assert!(block.set_annotation(0, "start"));
        assert!(block.set_annotation(10, "lead end"));
        assert!(!block.set_annotation(11, "nowhere"));
        assert_eq!(
            block.annotations().collect_vec(),
            [(0, "start"), (10, "lead end")]
        );
        assert!(block.clear_annotation(0));
        assert_eq!(block.annotations().collect_vec(), [(10, "lead end")]);
    }

    #[test]
    fn clear_and_counts() {
        let mut block = Block::new(Stage::DOUBLES);
        block.ring_lead(&plain_bob_lead()).unwrap();
        block.ring_lead(&plain_bob_lead()).unwrap();
        assert_eq!(block.rows_rung(), 20);
        block.reset_rows_rung();
        assert_eq!(block.rows_rung(), 0);
        assert_eq!(block.len(), 20);
        block.clear();
        assert!(block.is_empty());
        assert!(block.came_round());
    }

    #[test]
    fn display() {
        let mut block = Block::new(Stage::DOUBLES);
        block.expand_place_notation("5.1").unwrap();
        assert_eq!(
            block.to_string(),
            "    0   12345*\n    1   21435  5\n    2   13254  1"
        );
    }
}
