//! The kinds of call that can be made, and the touch strings which say where to make them.

use std::fmt::{Display, Formatter};

/// The kinds of call that a [`Method`](crate::Method) can define.  Each one is backed by its own
/// place notation, so adding a new kind of call means adding a variant here and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CallType {
    Bob,
    Single,
}

impl CallType {
    /// Every `CallType`, in the order they're usually written
    pub const ALL: [CallType; 2] = [CallType::Bob, CallType::Single];

    /// The [`char`] used for this call in touch strings (e.g. the `B` in `"PPBS"`)
    pub fn touch_symbol(self) -> char {
        match self {
            CallType::Bob => 'B',
            CallType::Single => 'S',
        }
    }

    /// The [`char`] used to mark the first row of this call
    pub fn row_symbol(self) -> char {
        match self {
            CallType::Bob => '-',
            CallType::Single => 'S',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CallType::Bob => "bob",
            CallType::Single => "single",
        }
    }
}

impl Display for CallType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What happens in one lead of a touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadType {
    Plain,
    Call(CallType),
}

impl LeadType {
    /// Parses a single (case-insensitive) `P`, `B` or `S`
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(LeadType::Plain),
            c => CallType::ALL
                .into_iter()
                .find(|call| call.touch_symbol() == c)
                .map(LeadType::Call),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            LeadType::Plain => 'P',
            LeadType::Call(call) => call.touch_symbol(),
        }
    }

    /// Returns the [`CallType`] made in this lead, if any
    pub fn call(self) -> Option<CallType> {
        match self {
            LeadType::Plain => None,
            LeadType::Call(call) => Some(call),
        }
    }
}

/// Parse a touch string like `"PPBS"` into one [`LeadType`] per lead.  Whitespace is always
/// ignored.  Any other [`char`] is either skipped (if `strict` is `false`) or returned as a
/// [`TouchError::InvalidCallChar`].
pub fn parse_touch(s: &str, strict: bool) -> Result<Vec<LeadType>, TouchError> {
    let mut leads = Vec::with_capacity(s.len());
    for (index, c) in s.char_indices() {
        if c.is_whitespace() {
            continue;
        }
        match LeadType::from_char(c) {
            Some(lead) => leads.push(lead),
            None if strict => return Err(TouchError::InvalidCallChar { index, c }),
            None => log::debug!("Ignoring {:?} at index {} of touch {:?}", c, index, s),
        }
    }
    Ok(leads)
}

/// The ways that adding calls to a [`Method`](crate::Method), or ringing a touch of it, can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchError {
    /// A touch string contained something other than `P`, `B`, `S` or whitespace.  `index` is the
    /// byte index of the offending [`char`].
    InvalidCallChar { index: usize, c: char },
    /// The calling position can't be reduced into the lead, because the lead has no rows
    CallingPositionOutOfRange {
        calling_position: isize,
        lead_len: usize,
    },
}

impl Display for TouchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TouchError::InvalidCallChar { index, c } => write!(
                f,
                "Invalid call {:?} at index {} of the touch (expected 'P', 'B' or 'S')",
                c, index
            ),
            TouchError::CallingPositionOutOfRange {
                calling_position,
                lead_len,
            } => write!(
                f,
                "Calling position {} can't be placed in a lead of {} rows",
                calling_position, lead_len
            ),
        }
    }
}

impl std::error::Error for TouchError {}

#[cfg(test)]
mod tests {
    use super::*;

    use LeadType::{Call, Plain};

    const BOB: LeadType = Call(CallType::Bob);
    const SINGLE: LeadType = Call(CallType::Single);

    #[test]
    fn parse() {
        #[track_caller]
        fn check(s: &str, exp_leads: &[LeadType]) {
            assert_eq!(parse_touch(s, true).unwrap(), exp_leads);
        }

        check("", &[]);
        check("PPPB", &[Plain, Plain, Plain, BOB]);
        check("pbs", &[Plain, BOB, SINGLE]);
        check(" PB  PS\n", &[Plain, BOB, Plain, SINGLE]);
    }

    #[test]
    fn strictness() {
        assert_eq!(
            parse_touch("PBXP", true),
            Err(TouchError::InvalidCallChar { index: 2, c: 'X' })
        );
        assert_eq!(
            parse_touch("P-B", true),
            Err(TouchError::InvalidCallChar { index: 1, c: '-' })
        );
        assert_eq!(parse_touch("PBXP", false), Ok(vec![Plain, BOB, Plain]));
        assert_eq!(parse_touch("P, B; S", false), Ok(vec![Plain, BOB, SINGLE]));
    }

    #[test]
    fn symbols_round_trip() {
        for lead in [Plain, BOB, SINGLE] {
            assert_eq!(LeadType::from_char(lead.to_char()), Some(lead));
        }
        for call in CallType::ALL {
            assert_eq!(Call(call).call(), Some(call));
        }
        assert_eq!(CallType::Bob.row_symbol(), '-');
        assert_eq!(CallType::Single.row_symbol(), 'S');
    }
}
